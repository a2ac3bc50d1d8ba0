use crate::model::TechnologyId;

/// A technology tag that projects link to.
#[derive(Debug, Clone, PartialEq)]
pub struct Technology {
    pub id: TechnologyId,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct TechnologyCreate {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct TechnologyUpdate {
    pub name: Option<String>,
}
