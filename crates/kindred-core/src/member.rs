//! The family member record.
//!
//! A [`FamilyMember`] is the unit of input for every Kindred operation. Members
//! reference their relatives by [`Id`] only; nothing here checks that those
//! ids resolve. Consumers look relatives up and skip the ones that are missing.
//!
//! The serialized form uses camelCase keys and omits absent optional fields:
//!
//! ```json
//! {
//!   "id": "john",
//!   "name": "John Smith",
//!   "gender": "male",
//!   "spouse": "mary",
//!   "children": ["robert", "linda"],
//!   "isAlive": false
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::identifier::Id;

/// Gender of a family member. Only used for presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

/// A single person in the family tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    id: Id,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    death_date: Option<String>,
    #[serde(default)]
    gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    spouse: Option<Id>,
    #[serde(default)]
    children: Vec<Id>,
    #[serde(default)]
    parents: Vec<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    relationship: Option<String>,
    #[serde(default = "default_is_alive")]
    is_alive: bool,
    /// Ids of life stories attached to this member.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    life_stories: Vec<String>,
}

fn default_is_alive() -> bool {
    true
}

impl FamilyMember {
    /// Creates a living member with no relatives and no optional details.
    pub fn new(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            birth_date: None,
            death_date: None,
            gender: Gender::default(),
            avatar: None,
            occupation: None,
            location: None,
            bio: None,
            spouse: None,
            children: Vec::new(),
            parents: Vec::new(),
            relationship: None,
            is_alive: true,
            life_stories: Vec::new(),
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_spouse(mut self, spouse: impl Into<Id>) -> Self {
        self.spouse = Some(spouse.into());
        self
    }

    pub fn with_children<I, T>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Id>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_parents<I, T>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Id>,
    {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_birth_date(mut self, birth_date: impl Into<String>) -> Self {
        self.birth_date = Some(birth_date.into());
        self
    }

    pub fn with_death_date(mut self, death_date: impl Into<String>) -> Self {
        self.death_date = Some(death_date.into());
        self.is_alive = false;
        self
    }

    pub fn with_occupation(mut self, occupation: impl Into<String>) -> Self {
        self.occupation = Some(occupation.into());
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn spouse(&self) -> Option<Id> {
        self.spouse
    }

    pub fn children(&self) -> &[Id] {
        &self.children
    }

    pub fn parents(&self) -> &[Id] {
        &self.parents
    }

    pub fn birth_date(&self) -> Option<&str> {
        self.birth_date.as_deref()
    }

    pub fn death_date(&self) -> Option<&str> {
        self.death_date.as_deref()
    }

    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    pub fn occupation(&self) -> Option<&str> {
        self.occupation.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn relationship(&self) -> Option<&str> {
        self.relationship.as_deref()
    }

    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    pub fn life_stories(&self) -> &[String] {
        &self.life_stories
    }

    /// Returns true if the member has no recorded parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}
