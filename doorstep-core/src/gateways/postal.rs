#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalArea {
    pub city: String,
    pub state: String,
}

pub trait PostalCodeLookup: Send + Sync {
    fn lookup(&self, postal_code: &str) -> Option<PostalArea>;
}
