// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use super::subtree::{OfflineOptions, Subtree};
use super::xml::{Document, Element, PathStep};
use crate::errors::Error;
use log::debug;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A named template parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Null,
    Bool(bool),
    Int(i64),
    String(String),
}

impl Param {
    /// Text of the parameter as an attribute value. Null and empty strings
    /// have none.
    fn render(&self) -> Option<String> {
        match self {
            Param::Null => None,
            Param::Bool(b) => Some(b.to_string()),
            Param::Int(i) => Some(i.to_string()),
            Param::String(s) if s.is_empty() => None,
            Param::String(s) => Some(s.clone()),
        }
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::String(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::String(value)
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map_or(Param::Null, Into::into)
    }
}

/// Error raised by a template. The engine reports it together with the
/// template name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TemplateError(String);

impl TemplateError {
    pub fn new(message: impl Into<String>) -> Self {
        TemplateError(message.into())
    }
}

/// Parameters bound to a transform, looked up by name from the template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    values: BTreeMap<String, Param>,
}

impl Parameters {
    pub fn get(&self, key: &str) -> Option<&Param> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn lookup(&self, key: &str) -> Result<&Param, TemplateError> {
        self.values
            .get(key)
            .ok_or_else(|| TemplateError::new(format!("parameter {key} was not supplied")))
    }

    /// Attribute text for an optional value. Every parameter a template
    /// reads must be bound, even when it is null.
    pub fn attribute(&self, key: &str) -> Result<Option<String>, TemplateError> {
        Ok(self.lookup(key)?.render())
    }

    pub fn required(&self, key: &str) -> Result<String, TemplateError> {
        self.attribute(key)?.ok_or_else(|| {
            TemplateError::new(format!("{key} must be specified as non empty value"))
        })
    }

    /// Boolean parameter; null reads as false.
    pub fn flag(&self, key: &str) -> Result<bool, TemplateError> {
        match self.lookup(key)? {
            Param::Bool(b) => Ok(*b),
            Param::Null => Ok(false),
            other => Err(TemplateError::new(format!(
                "parameter {key} is not a boolean: {other:?}"
            ))),
        }
    }
}

pub type TemplateFn = fn(&mut Scope<'_>, &Parameters) -> Result<(), TemplateError>;

/// A named, reusable document edit.
pub struct Template {
    pub name: &'static str,
    pub apply: TemplateFn,
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template").field("name", &self.name).finish()
    }
}

/// The part of the document a template may edit.
pub struct Scope<'a> {
    name: &'a str,
    element: &'a mut Element,
    depth: usize,
}

impl Scope<'_> {
    /// Name the subtree was bound under.
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn element(&self) -> &Element {
        &*self.element
    }

    pub fn element_mut(&mut self) -> &mut Element {
        &mut *self.element
    }

    /// Adds a named element under `path`, creating missing collection
    /// elements in schema order. An element of the same kind and name is
    /// replaced when `replace_existing` is set, otherwise it is an error.
    pub fn add_named(
        &mut self,
        path: &[PathStep<'_>],
        element: Element,
        replace_existing: bool,
    ) -> Result<(), TemplateError> {
        let name = element
            .attribute("name")
            .ok_or_else(|| TemplateError::new(format!("{} has no name", element.local_name())))?
            .to_string();
        let names: Vec<&str> = path.iter().map(|step| step.name).collect();
        let depth = self.depth + path.len();

        if let Some(collection) = self.element.descendant_mut(&names) {
            let existing = collection.position(|e| {
                e.local_name() == element.local_name() && e.attribute("name") == Some(name.as_str())
            });
            if let Some(index) = existing {
                if !replace_existing {
                    return Err(TemplateError::new(format!(
                        "{} with name {name} already exists in configuration. Use different name.",
                        element.local_name()
                    )));
                }
                debug!("replacing {} {name}", element.local_name());
                collection.replace_node(index, element, depth);
                return Ok(());
            }
        }

        debug!("adding {} {name}", element.local_name());
        self.element.insert_at_path(path, element, self.depth);
        Ok(())
    }
}

/// A template bound to a subtree and a set of named parameters.
#[derive(Debug, Clone)]
pub struct XmlTransform {
    template: &'static Template,
    subtree_name: String,
    subtree: Subtree,
    parameters: Parameters,
}

impl XmlTransform {
    pub fn of(template: &'static Template) -> XmlTransformBuilder {
        XmlTransformBuilder {
            template,
            subtree_name: "root".to_string(),
            subtree: Subtree::Root,
            parameters: Parameters::default(),
        }
    }

    pub fn template_name(&self) -> &'static str {
        self.template.name
    }

    pub fn subtree(&self) -> &Subtree {
        &self.subtree
    }

    pub fn subtree_name(&self) -> &str {
        &self.subtree_name
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Runs the template against `document`.
    pub fn apply_to(&self, document: &mut Document, options: &OfflineOptions) -> Result<(), Error> {
        let (element, depth) = self.subtree.locate(document.root_mut(), options)?;
        let mut scope = Scope {
            name: &self.subtree_name,
            element,
            depth,
        };
        debug!(
            "running {} on {} with {} parameters",
            self.template.name,
            self.subtree,
            self.parameters.len()
        );
        (self.template.apply)(&mut scope, &self.parameters).map_err(|e| Error::Transform {
            template: self.template.name,
            message: e.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct XmlTransformBuilder {
    template: &'static Template,
    subtree_name: String,
    subtree: Subtree,
    parameters: Parameters,
}

impl XmlTransformBuilder {
    /// Scopes the transform to `subtree`, bound under `name`.
    pub fn subtree(mut self, name: impl Into<String>, subtree: Subtree) -> Self {
        self.subtree_name = name.into();
        self.subtree = subtree;
        self
    }

    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<Param>) -> Self {
        self.parameters.values.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> XmlTransform {
        XmlTransform {
            template: self.template,
            subtree_name: self.subtree_name,
            subtree: self.subtree,
            parameters: self.parameters,
        }
    }
}
