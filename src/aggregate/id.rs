// Copyright (c) 2025 - Cowboy AI, Inc.
//! Typed aggregate identifiers

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Identifier of an aggregate of type `A`
///
/// The phantom type keeps ids of different aggregates apart at compile
/// time; on the wire it is a plain UUID.
pub struct AggregateId<A> {
    uuid: Uuid,
    _marker: PhantomData<fn() -> A>,
}

impl<A> AggregateId<A> {
    /// Fresh time-ordered id
    pub fn new() -> Self {
        Self::from_uuid(Uuid::now_v7())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _marker: PhantomData,
        }
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.uuid
    }
}

impl<A> Default for AggregateId<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for AggregateId<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for AggregateId<A> {}

impl<A> PartialEq for AggregateId<A> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<A> Eq for AggregateId<A> {}

impl<A> Hash for AggregateId<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<A> fmt::Debug for AggregateId<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AggregateId({})", self.uuid)
    }
}

impl<A> fmt::Display for AggregateId<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.uuid, f)
    }
}

impl<A> From<Uuid> for AggregateId<A> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<A> From<AggregateId<A>> for Uuid {
    fn from(id: AggregateId<A>) -> Self {
        id.uuid
    }
}

impl<A> Serialize for AggregateId<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.uuid.serialize(serializer)
    }
}

impl<'de, A> Deserialize<'de> for AggregateId<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}
