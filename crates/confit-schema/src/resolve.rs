//! Process-wide schema resolution.
//!
//! Record schemas depend only on type declarations, so each one is built
//! exactly once and memoized by `TypeId`. The memo (including the
//! per-root "verified acyclic" flag) is the engine's only shared mutable
//! state; everything else is a pure function of its inputs.

use std::any::TypeId;
use std::sync::{Mutex, OnceLock, PoisonError};

use ahash::{AHashMap, AHashSet};

use crate::SchemaError;
use crate::schema::{RecordSchema, Shape};

struct CacheEntry {
    schema: &'static Result<RecordSchema, SchemaError>,
    verified: bool,
}

static SCHEMAS: OnceLock<Mutex<AHashMap<TypeId, CacheEntry>>> = OnceLock::new();

fn cache() -> &'static Mutex<AHashMap<TypeId, CacheEntry>> {
    SCHEMAS.get_or_init(|| Mutex::new(AHashMap::new()))
}

fn lock() -> std::sync::MutexGuard<'static, AHashMap<TypeId, CacheEntry>> {
    cache().lock().unwrap_or_else(PoisonError::into_inner)
}

/// Resolves the schema keyed by `T`, building it on first use.
///
/// The builder runs under the memo lock, which is safe because building
/// never resolves another record: nested record shapes are lazy
/// [`RecordHandle`](crate::schema::RecordHandle)s.
pub fn resolve<T: 'static>(
    build: fn() -> Result<RecordSchema, SchemaError>,
) -> Result<&'static RecordSchema, SchemaError> {
    let mut map = lock();
    let entry = map.entry(TypeId::of::<T>()).or_insert_with(|| CacheEntry {
        schema: Box::leak(Box::new(build())),
        verified: false,
    });
    entry.schema.as_ref().map_err(Clone::clone)
}

/// Fails on record cycles not broken by an Optional, List, or Map
/// boundary; such a cycle would make binding and rendering unbounded.
///
/// A verified root is remembered in the memo, so constructing binders
/// repeatedly stays cheap.
pub fn verify_acyclic(root_id: TypeId, root: &'static RecordSchema) -> Result<(), SchemaError> {
    if lock().get(&root_id).is_some_and(|entry| entry.verified) {
        return Ok(());
    }

    let mut stack = Vec::new();
    let mut done = AHashSet::new();
    walk_record(root_id, root, &mut stack, &mut done)?;

    if let Some(entry) = lock().get_mut(&root_id) {
        entry.verified = true;
    }
    Ok(())
}

enum Frame {
    Record { id: TypeId, name: &'static str },
    Boundary,
}

fn walk_record(
    id: TypeId,
    schema: &'static RecordSchema,
    stack: &mut Vec<Frame>,
    done: &mut AHashSet<TypeId>,
) -> Result<(), SchemaError> {
    stack.push(Frame::Record {
        id,
        name: schema.name(),
    });
    for field in schema.fields() {
        walk_shape(&field.shape, stack, done)?;
    }
    stack.pop();
    done.insert(id);
    Ok(())
}

fn walk_shape(
    shape: &Shape,
    stack: &mut Vec<Frame>,
    done: &mut AHashSet<TypeId>,
) -> Result<(), SchemaError> {
    match shape {
        Shape::Optional(inner) | Shape::List(inner) | Shape::Map(inner) => {
            stack.push(Frame::Boundary);
            let out = walk_shape(inner, stack, done);
            stack.pop();
            out
        }
        Shape::Tuple(items) => {
            for item in items {
                walk_shape(item, stack, done)?;
            }
            Ok(())
        }
        Shape::Record(handle) => {
            let revisited = stack.iter().position(
                |frame| matches!(frame, Frame::Record { id, .. } if *id == handle.type_id()),
            );
            if let Some(pos) = revisited {
                let crossed_boundary = stack[pos..]
                    .iter()
                    .any(|frame| matches!(frame, Frame::Boundary));
                if crossed_boundary {
                    // Legal recursion; the occurrence above is already
                    // being walked.
                    return Ok(());
                }
                let mut cycle: Vec<&'static str> = stack[pos..]
                    .iter()
                    .filter_map(|frame| match frame {
                        Frame::Record { name, .. } => Some(*name),
                        Frame::Boundary => None,
                    })
                    .collect();
                cycle.push(handle.name());
                return Err(SchemaError::CyclicRecord { cycle });
            }
            if done.contains(&handle.type_id()) {
                return Ok(());
            }
            walk_record(handle.type_id(), handle.schema()?, stack, done)
        }
        Shape::Scalar(_) | Shape::Reference { .. } | Shape::Choice { .. } | Shape::Duration => {
            Ok(())
        }
    }
}
