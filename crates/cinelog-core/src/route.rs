use cinelog_models::EntryId;

/// Where a view transition sends the user next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(EntryId),
    Record,
}
