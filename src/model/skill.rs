use crate::model::{ProfileId, SkillId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Proficiency level, stored and transferred by its short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProficiencyLevel {
    #[serde(rename = "beg")]
    Beginner,
    #[serde(rename = "int")]
    Intermediate,
    #[serde(rename = "adv")]
    Advanced,
}

impl ProficiencyLevel {
    pub const ALL: [ProficiencyLevel; 3] = [
        ProficiencyLevel::Beginner,
        ProficiencyLevel::Intermediate,
        ProficiencyLevel::Advanced,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ProficiencyLevel::Beginner => "beg",
            ProficiencyLevel::Intermediate => "int",
            ProficiencyLevel::Advanced => "adv",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.code() == code)
    }
}

/// A skill owned by a profile. Names are unique per owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub id: SkillId,
    pub user: ProfileId,
    pub name: String,
    pub proficiency_level: ProficiencyLevel,
    pub category: String,
    pub certification_url: Option<String>,
}

impl Skill {
    /// Category ascending, then level code descending.
    ///
    /// The level compares by its code string, so "int" sorts before "beg" before "adv".
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        self.category.cmp(&other.category).then_with(|| {
            other
                .proficiency_level
                .code()
                .cmp(self.proficiency_level.code())
        })
    }
}

#[derive(Debug, Clone)]
pub struct SkillCreate {
    pub user: ProfileId,
    pub name: String,
    pub proficiency_level: ProficiencyLevel,
    pub category: String,
    pub certification_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SkillUpdate {
    pub user: Option<ProfileId>,
    pub name: Option<String>,
    pub proficiency_level: Option<ProficiencyLevel>,
    pub category: Option<String>,
    pub certification_url: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(id: u32, category: &str, level: ProficiencyLevel) -> Skill {
        Skill {
            id: SkillId(id),
            user: ProfileId(1),
            name: format!("skill {id}"),
            proficiency_level: level,
            category: category.into(),
            certification_url: None,
        }
    }

    #[test]
    fn test_level_codes_round_trip() {
        for level in ProficiencyLevel::ALL {
            assert_eq!(ProficiencyLevel::from_code(level.code()), Some(level));
        }
        assert_eq!(ProficiencyLevel::from_code("expert"), None);
    }

    #[test]
    fn test_skills_sort_by_category_then_level_code_descending() {
        let mut skills = vec![
            skill(1, "Languages", ProficiencyLevel::Advanced),
            skill(2, "Languages", ProficiencyLevel::Beginner),
            skill(3, "Databases", ProficiencyLevel::Advanced),
            skill(4, "Languages", ProficiencyLevel::Intermediate),
        ];
        skills.sort_by(Skill::display_cmp);

        let ids: Vec<u32> = skills.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![3, 4, 2, 1]);
    }
}
