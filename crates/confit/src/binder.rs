//! The typed front door: one value that parses, binds, and renders
//! documents for a single record type.

use std::any::TypeId;
use std::marker::PhantomData;

use confit_schema::{
    BindReport, Record, RecordSchema, Registry, SchemaError, bind_root, bind_value,
    render_instance, render_template, verify_acyclic,
};
use confit_value::{Node, Table, ToNode};

use crate::Error;

/// Binds documents onto the record type `T`.
///
/// Construction resolves `T`'s schema and runs the cycle check once;
/// the binder then handles any number of documents.
pub struct Binder<T: Record> {
    schema: &'static RecordSchema,
    registry: Registry,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Binder<T> {
    /// A binder over an empty registry, for schemas without reference
    /// fields.
    pub fn new() -> Result<Self, SchemaError> {
        Self::with_registry(Registry::new())
    }

    /// A binder whose reference fields resolve against `registry`.
    pub fn with_registry(registry: Registry) -> Result<Self, SchemaError> {
        let schema = T::schema()?;
        verify_acyclic(TypeId::of::<T>(), schema)?;
        log::debug!("binder ready for record `{}`", schema.name());
        Ok(Binder {
            schema,
            registry,
            _record: PhantomData,
        })
    }

    /// The resolved schema this binder checks documents against.
    pub fn schema(&self) -> &'static RecordSchema {
        self.schema
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parses TOML source and binds the document root as `T`.
    pub fn parse(&self, source: &str) -> Result<T, Error> {
        let node = confit_toml::parse(source)?;
        Ok(self.bind(&node)?)
    }

    /// Binds an already-parsed document, bypassing the text front end.
    pub fn bind(&self, node: &Node) -> Result<T, BindReport> {
        bind_value(node, &self.registry)
    }

    /// Binds an in-memory table built by the caller.
    pub fn bind_table(&self, table: &Table) -> Result<T, BindReport> {
        bind_root(table, &self.registry)
    }

    /// Renders an annotated starter document for `T`.
    pub fn template(&self) -> Result<String, SchemaError> {
        render_template(self.schema)
    }

    /// Renders the starter document with `value`'s fields filled in
    /// live.
    pub fn template_for(&self, value: &T) -> Result<String, SchemaError>
    where
        T: ToNode,
    {
        match value.to_node() {
            Node::Table(table) => render_instance(self.schema, &table),
            // A record always emits a table.
            _ => unreachable!("record `{}` did not emit a table", self.schema.name()),
        }
    }
}
