pub mod branch_name;

/// git ref-name rules, plus `=` which separates name and id in the reference table
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|=|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Name of the reference tracking the current checkout position
pub const HEAD_REF_NAME: &str = "head";
/// Branch created by the first commit
pub const DEFAULT_BRANCH: &str = "master";
