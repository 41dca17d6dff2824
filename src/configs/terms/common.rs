// config sections
pub const METRICS: &str = "metrics";
pub const INPUT: &str = "input";
pub const OUTPUT: &str = "output";

// common config terms
pub const FORMAT: &str = "format";
pub const HEADER: &str = "header";
pub const IGNORE_FAULTS: &str = "ignore_faults";

// metric definition terms
pub const DEFINITION: &str = "definition";
pub const LABEL: &str = "label";
pub const DESCRIPTION: &str = "description";
pub const UNIT: &str = "unit";
pub const TYPE: &str = "type";
