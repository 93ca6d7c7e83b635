/// The default indentation (in spaces) used when dumping a dictionary.
pub const DEFAULT_DUMP_INDENT: usize = 1;
