mod constants;
mod key;
mod objects;
mod sub_stats;

pub use constants::DEFAULT_DUMP_INDENT;
pub use key::DictKey;
pub use objects::TgnObjectsDict;
pub use sub_stats::{
    SubStatsEntry,
    TgnSubStatsDict,
};
