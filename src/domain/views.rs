use crate::domain::model::{Nanny, SortOption};
use serde::{Deserialize, Serialize};

/// One rendered window of the derived list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryPage {
    pub option: SortOption,
    pub favorites_only: bool,
    pub visible: usize,
    pub total: usize,
    pub has_more: bool,
    pub nannies: Vec<Nanny>,
}
