//! Evaluation of a single operation against the loaded entities.

use cityagg_core::entity::Entity;
use cityagg_core::operation::{Attribute, Operation, ResultRecord};
use serde::{Deserialize, Serialize};

use crate::aggregate::{compute, resolve_path, AggregatePath};
use crate::filter::NameFilter;
use crate::traits::OpError;

/// Outcome of one evaluated operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub record: ResultRecord,
    pub path: AggregatePath,
    pub matched: usize,
}

/// What an operation would compute, without computing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationPlan {
    pub name: String,
    pub path: AggregatePath,
    pub filter: String,
    pub matched: usize,
}

/// Filter, dispatch, aggregate, and round one operation.
///
/// Steps run in that order, so an invalid filter is reported before an
/// unknown function. Zero matching entities is an `EmptySelection` error for
/// every function.
pub fn evaluate(op: &Operation, entities: &[Entity]) -> Result<Evaluation, OpError> {
    let filter = NameFilter::new(&op.filter)?;
    let selected = filter.select(entities);
    let path = resolve(op)?;

    let value = compute(path, &selected).ok_or_else(|| OpError::EmptySelection {
        operation: op.name.clone(),
        filter: op.filter.clone(),
    })?;
    let rendered = value.render()?;

    tracing::debug!(
        operation = %op.name,
        function = %path.function,
        attribute = %path.attribute,
        matched = selected.len(),
        value = %rendered,
        "evaluated operation"
    );

    Ok(Evaluation {
        record: ResultRecord::new(op.name.clone(), rendered),
        path,
        matched: selected.len(),
    })
}

/// Resolve filter, function, and attribute path and count matches.
pub fn describe(op: &Operation, entities: &[Entity]) -> Result<OperationPlan, OpError> {
    let filter = NameFilter::new(&op.filter)?;
    let matched = entities.iter().filter(|e| filter.matches(e.name())).count();
    let path = resolve(op)?;
    Ok(OperationPlan {
        name: op.name.clone(),
        path,
        filter: op.filter.clone(),
        matched,
    })
}

fn resolve(op: &Operation) -> Result<AggregatePath, OpError> {
    let function = op.resolve_function()?;
    if !Attribute::Population.is_named(&op.attribute) && !Attribute::Area.is_named(&op.attribute)
    {
        tracing::warn!(
            operation = %op.name,
            attribute = %op.attribute,
            "unrecognised attribute; falling back to the function's default path"
        );
    }
    Ok(resolve_path(function, &op.attribute))
}
