// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Hash keys of the delay tables.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A duration in seconds compared by exact value.
///
/// `0.0` and `-0.0` are the same key. Every NaN is the same key, so repeated
/// NaN requests reuse one entry instead of growing the table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SecondsKey(pub(crate) f32);

impl SecondsKey {
    fn canonical_bits(self) -> u32 {
        if self.0 == 0.0 {
            0
        } else if self.0.is_nan() {
            f32::NAN.to_bits()
        } else {
            self.0.to_bits()
        }
    }
}

impl PartialEq for SecondsKey {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 || (self.0.is_nan() && other.0.is_nan())
    }
}

impl Eq for SecondsKey {}

impl Hash for SecondsKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_bits().hash(state);
    }
}

/// A shared completion predicate with identity semantics.
///
/// Two handles are equal only if they were cloned from the same
/// [`PredicateHandle::new`] call. Closures with identical bodies constructed
/// separately are different predicates.
#[derive(Clone)]
pub struct PredicateHandle(Rc<dyn Fn() -> bool>);

impl PredicateHandle {
    /// Wraps `predicate` in a new handle with its own identity.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Self(Rc::new(predicate))
    }

    /// Invokes the predicate.
    #[inline]
    pub fn evaluate(&self) -> bool {
        (self.0)()
    }

    /// Returns `true` if both handles share the same predicate.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for PredicateHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for PredicateHandle {}

impl Hash for PredicateHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for PredicateHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PredicateHandle").field(&self.addr()).finish()
    }
}

/// Key of the predicate table: a duration plus predicate identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PredicateKey {
    pub(crate) seconds: SecondsKey,
    pub(crate) predicate: PredicateHandle,
}
