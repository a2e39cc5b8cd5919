//! Element and attribute names of the three XML documents.

pub const CITY: &str = "city";
pub const AREA: &str = "area";
pub const POPULATION: &str = "population";
pub const NAME: &str = "name";

pub const OPERATION: &str = "operation";
pub const TYPE: &str = "type";
pub const FUNCTION: &str = "func";
pub const ATTRIBUTE: &str = "attrib";
pub const FILTER: &str = "filter";

pub const RESULTS: &str = "results";
pub const RESULT: &str = "result";
