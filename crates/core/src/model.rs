//! Entity model: the typed shape of one API surface.
//!
//! A [`Snapshot`] holds the [`Entity`] definitions of one release. Entities
//! are interfaces (method sets) or data classes (field sets); each
//! [`Member`] carries its signature, a default-implementation flag and an
//! explicit [`DeprecationState`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use crate::error::ModelError;

/// Kind of a tracked entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Interface,
    DataClass,
}

impl EntityKind {
    /// The only member kind this entity kind may contain.
    pub fn member_kind(self) -> MemberKind {
        match self {
            EntityKind::Interface => MemberKind::Method,
            EntityKind::DataClass => MemberKind::Field,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Interface => write!(f, "interface"),
            EntityKind::DataClass => write!(f, "data-class"),
        }
    }
}

/// Kind of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberKind {
    Method,
    Field,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Method => write!(f, "method"),
            MemberKind::Field => write!(f, "field"),
        }
    }
}

/// Ordered parameter type tags for a method, or the single value type of a
/// field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(pub Vec<String>);

impl Signature {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Signature(types.into_iter().map(Into::into).collect())
    }

    pub fn types(&self) -> &[String] {
        &self.0
    }
}

/// Lifecycle position of a member.
///
/// `Active -> DeprecatedForRemoval -> Removed` is the only path that may end
/// in removal. `Deprecated` is a plain deprecation warning that never
/// licenses removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum DeprecationState {
    Active,
    Deprecated {
        since: String,
    },
    DeprecatedForRemoval {
        since: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },
    Removed,
}

impl DeprecationState {
    pub fn is_deprecated_for_removal(&self) -> bool {
        matches!(self, DeprecationState::DeprecatedForRemoval { .. })
    }

    pub fn is_removed(&self) -> bool {
        matches!(self, DeprecationState::Removed)
    }

    /// Version the member was first marked deprecated in, if any.
    pub fn since(&self) -> Option<&str> {
        match self {
            DeprecationState::Deprecated { since }
            | DeprecationState::DeprecatedForRemoval { since, .. } => Some(since),
            _ => None,
        }
    }
}

impl fmt::Display for DeprecationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeprecationState::Active => write!(f, "active"),
            DeprecationState::Deprecated { since } => write!(f, "deprecated since {}", since),
            DeprecationState::DeprecatedForRemoval { since, target } => match target {
                Some(t) => write!(f, "deprecated for removal since {} (target {})", since, t),
                None => write!(f, "deprecated for removal since {}", since),
            },
            DeprecationState::Removed => write!(f, "removed"),
        }
    }
}

/// A method on an interface or a field on a data class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    pub signature: Signature,
    #[serde(default)]
    pub has_default: bool,
    pub deprecation: DeprecationState,
}

impl Member {
    pub fn method<I, S>(name: &str, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Member {
            name: name.to_string(),
            kind: MemberKind::Method,
            signature: Signature::new(params),
            has_default: false,
            deprecation: DeprecationState::Active,
        }
    }

    pub fn field(name: &str, value_type: &str) -> Self {
        Member {
            name: name.to_string(),
            kind: MemberKind::Field,
            signature: Signature::new([value_type]),
            has_default: false,
            deprecation: DeprecationState::Active,
        }
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub fn deprecated_for_removal(mut self, since: &str, target: Option<&str>) -> Self {
        self.deprecation = DeprecationState::DeprecatedForRemoval {
            since: since.to_string(),
            target: target.map(str::to_string),
        };
        self
    }

    pub fn deprecated(mut self, since: &str) -> Self {
        self.deprecation = DeprecationState::Deprecated {
            since: since.to_string(),
        };
        self
    }

    pub fn removed(mut self) -> Self {
        self.deprecation = DeprecationState::Removed;
        self
    }

    /// The member as written in source-like form: `name(A,B)` or `name: T`.
    pub fn display_signature(&self) -> String {
        match self.kind {
            MemberKind::Method => format!("{}({})", self.name, self.signature.0.join(",")),
            MemberKind::Field => format!("{}: {}", self.name, self.signature.0.join(",")),
        }
    }

    /// Stable identity within an entity: `name(A,B)` for methods, `name` for
    /// fields.
    pub fn identity(&self) -> String {
        match self.kind {
            MemberKind::Method => format!("{}({})", self.name, self.signature.0.join(",")),
            MemberKind::Field => self.name.clone(),
        }
    }

    /// Tombstoned members are listed but no longer part of the surface.
    pub fn is_present(&self) -> bool {
        !self.deprecation.is_removed()
    }
}

/// Fully qualified member identity: `Entity.name(A,B)` or `Entity.name`.
pub fn member_identity(entity: &str, member: &Member) -> String {
    format!("{}.{}", entity, member.identity())
}

/// An interface or data class with a validated member set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    name: String,
    kind: EntityKind,
    members: Vec<Member>,
}

impl Entity {
    /// Build an entity, rejecting members of the wrong kind and members
    /// that collide on identity.
    ///
    /// Methods collide on `(name, signature)`; fields collide on name alone
    /// since a field cannot be overloaded.
    pub fn new(name: &str, kind: EntityKind, members: Vec<Member>) -> Result<Self, ModelError> {
        let mut seen = HashSet::with_capacity(members.len());
        for member in &members {
            if member.kind != kind.member_kind() {
                return Err(ModelError::MemberKindMismatch {
                    entity: name.to_string(),
                    entity_kind: kind.to_string(),
                    member: member.name.clone(),
                    member_kind: member.kind.to_string(),
                });
            }
            if !seen.insert(member.identity()) {
                return Err(ModelError::DuplicateMember {
                    entity: name.to_string(),
                    member: member.identity(),
                });
            }
        }

        Ok(Entity {
            name: name.to_string(),
            kind,
            members,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// All overloads sharing a name, in declaration order.
    pub fn members_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Member> + 'a {
        self.members.iter().filter(move |m| m.name == name)
    }

    /// The member with this exact name and signature.
    pub fn member(&self, name: &str, signature: &Signature) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| m.name == name && &m.signature == signature)
    }

    /// Present (non-tombstoned) members grouped by name.
    pub fn present_by_name(&self) -> BTreeMap<&str, Vec<&Member>> {
        let mut grouped: BTreeMap<&str, Vec<&Member>> = BTreeMap::new();
        for member in self.members.iter().filter(|m| m.is_present()) {
            grouped.entry(member.name.as_str()).or_default().push(member);
        }
        grouped
    }
}

/// The entities of one released version. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    version: String,
    entities: Vec<Entity>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Snapshot {
    /// Build a snapshot, preserving entity order and rejecting duplicate
    /// entity names.
    pub fn new(version: &str, entities: Vec<Entity>) -> Result<Self, ModelError> {
        let mut index = HashMap::with_capacity(entities.len());
        for (pos, entity) in entities.iter().enumerate() {
            if index.insert(entity.name().to_string(), pos).is_some() {
                return Err(ModelError::DuplicateEntity {
                    version: version.to_string(),
                    entity: entity.name().to_string(),
                });
            }
        }

        Ok(Snapshot {
            version: version.to_string(),
            entities,
            index,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Entities in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.index.get(name).map(|&pos| &self.entities[pos])
    }
}
