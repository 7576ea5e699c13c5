//! The scoping pass.
//!
//! One call to [`ScopeTransform::run`] rewrites a style sheet in four
//! passes, each over the whole tree in document order:
//!
//! 1. `@keyframes <name>` becomes `@keyframes <scoped name>`
//! 2. `composes` declarations are recorded in the registry and removed
//! 3. `animation-name` and `animation` values are rewritten
//! 4. every style rule selector has its classes and ids scoped, honoring
//!    `:local(...)` and `:global(...)`; rules nested in other rules may
//!    start with a combinator (`> .child`)
//!
//! Later passes see the names registered by earlier ones; in particular the
//! `animation` shorthand only rewrites tokens that are already known.

use crate::composes::{Origin, parse_composes};
use crate::error::{Location, Result, ScopeError};
use crate::exports::Message;
use crate::options::ScopeOptions;
use crate::registry::{Composition, Registry};
use cssom::{
    Declaration, Node, Position, Rule, Selector, StyleSheet, parse_relative_selector,
    parse_selector,
};

/// Rewrites style sheets according to a fixed set of options.
///
/// The transform holds no per-run state, so one instance can process many
/// style sheets, from several threads if needed.
#[derive(Clone, Debug, Default)]
pub struct ScopeTransform {
    options: ScopeOptions,
}

/// What a node list belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Parent {
    Root,
    TopLevelRule,
    NestedRule,
    AtRule,
}

impl ScopeTransform {
    pub fn new(options: ScopeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScopeOptions {
        &self.options
    }

    /// Scopes `sheet` in place and appends the export record to `messages`.
    ///
    /// `file_path` identifies the style sheet to the name generator. On error
    /// nothing is appended and `sheet` may be partially rewritten.
    pub fn run(
        &self,
        sheet: &mut StyleSheet,
        file_path: Option<&str>,
        messages: &mut Vec<Message>,
    ) -> Result<()> {
        let path = file_path.map(|path| self.options.generator_path(path));
        let mut registry = Registry::new(self.options.generator(), path);

        rename_keyframes(&mut sheet.nodes, &mut registry);
        resolve_composes(&mut sheet.nodes, Parent::Root, None, &mut registry)?;
        rewrite_animations(&mut sheet.nodes, &mut registry);
        scope_rules(&mut sheet.nodes, false, false, &mut registry)?;

        log::debug!(
            "scoped {} local names in {}",
            registry.len(),
            file_path.unwrap_or("<anonymous>")
        );
        messages.push(Message::ExportLocals {
            locals: registry.into_locals(),
        });
        Ok(())
    }
}

fn rename_keyframes(nodes: &mut [Node], registry: &mut Registry) {
    for node in nodes {
        match node {
            Node::AtRule(at_rule) => {
                if at_rule.is_keyframes() {
                    let name = at_rule.params.trim();
                    if !name.is_empty() {
                        let local = registry.retrieve_local(name).local().to_string();
                        log::trace!("@{} {} -> {}", at_rule.name, name, local);
                        at_rule.params = local;
                    }
                }
                if let Some(children) = &mut at_rule.nodes {
                    rename_keyframes(children, registry);
                }
            }
            Node::Rule(rule) => rename_keyframes(&mut rule.nodes, registry),
            _ => {}
        }
    }
}

fn is_composes(decl: &Declaration) -> bool {
    decl.property.eq_ignore_ascii_case("composes")
}

fn declaration_location(decl: &Declaration) -> Location {
    Location::new(decl.position, format!("{}: {}", decl.property, decl.value))
}

/// Names of the simple class or id selectors a composing rule applies to.
fn composing_names(selector: &str, position: Option<Position>) -> Result<Vec<String>> {
    let location = || Location::new(position, selector);
    let parsed = parse_selector(selector).map_err(|source| ScopeError::SelectorParse {
        location: location(),
        source,
    })?;

    parsed
        .branches()
        .iter()
        .map(|branch| match branch {
            Selector::Compound(parts) => match parts.as_slice() {
                [Selector::Class(name)] | [Selector::Id(name)] => Ok(name.clone()),
                _ => Err(ScopeError::ComplexSelector(location())),
            },
            _ => Err(ScopeError::ComplexSelector(location())),
        })
        .collect()
}

/// Records and removes every `composes` declaration under `nodes`.
///
/// `rule` is the rule owning `nodes`, if any.
fn resolve_composes(
    nodes: &mut Vec<Node>,
    parent: Parent,
    rule: Option<(&str, Option<Position>)>,
    registry: &mut Registry,
) -> Result<()> {
    let mut i = 0;
    while i < nodes.len() {
        match &mut nodes[i] {
            Node::Declaration(decl) if is_composes(decl) => {
                let (selector, position) = match (parent, rule) {
                    (Parent::TopLevelRule, Some(rule)) => rule,
                    _ => return Err(ScopeError::NestedRule(declaration_location(decl))),
                };
                let targets = composing_names(selector, position)?;
                compose(decl, &targets, registry)?;
                nodes.remove(i);
                continue;
            }
            Node::Rule(child) => {
                let child_parent = if parent == Parent::Root {
                    Parent::TopLevelRule
                } else {
                    Parent::NestedRule
                };
                let Rule {
                    selector,
                    nodes: children,
                    position,
                } = child;
                let rule = Some((selector.as_str(), *position));
                resolve_composes(children, child_parent, rule, registry)?;
            }
            Node::AtRule(at_rule) => {
                if let Some(children) = &mut at_rule.nodes {
                    resolve_composes(children, Parent::AtRule, None, registry)?;
                }
            }
            _ => {}
        }
        i += 1;
    }
    Ok(())
}

fn compose(decl: &Declaration, targets: &[String], registry: &mut Registry) -> Result<()> {
    let parsed = parse_composes(&decl.value)
        .ok_or_else(|| ScopeError::InvalidComposes(declaration_location(decl)))?;

    let name = parsed.name.to_string();
    let composition = match parsed.origin {
        Origin::Local => {
            let local = registry.retrieve_local(&name).local().to_string();
            Composition::Local { name, local }
        }
        Origin::Global => Composition::Global { name },
        Origin::Dependency(specifier) => Composition::Dependency {
            name,
            specifier: specifier.to_string(),
        },
    };

    log::debug!("{} composes {:?}", targets.join(", "), composition);
    for target in targets {
        registry.add_composition(target, composition.clone());
    }
    Ok(())
}

/// `animation-name` / `animation`, ignoring any vendor prefix.
///
/// Custom properties (`--animation`) are not animation properties.
fn animation_property(property: &str) -> Option<&'static str> {
    let property = property.to_ascii_lowercase();
    let unprefixed = match property.strip_prefix('-') {
        Some(rest) => match rest.split_once('-') {
            Some((vendor, rest)) if !vendor.is_empty() => rest,
            _ => return None,
        },
        None => property.as_str(),
    };
    match unprefixed {
        "animation-name" => Some("animation-name"),
        "animation" => Some("animation"),
        _ => None,
    }
}

fn rewrite_animations(nodes: &mut [Node], registry: &mut Registry) {
    for node in nodes {
        match node {
            Node::Declaration(decl) => match animation_property(&decl.property) {
                Some("animation-name") => {
                    let name = decl.value.trim();
                    if !name.is_empty() {
                        let local = registry.retrieve_local(name).local().to_string();
                        log::trace!("{}: {} -> {}", decl.property, name, local);
                        decl.value = local;
                    }
                }
                Some(_) => {
                    let value = decl
                        .value
                        .split_whitespace()
                        .map(|token| registry.get(token).map_or(token, |entry| entry.local()))
                        .collect::<Vec<_>>()
                        .join(" ");
                    log::trace!("{}: {} -> {}", decl.property, decl.value, value);
                    decl.value = value;
                }
                None => {}
            },
            Node::Rule(rule) => rewrite_animations(&mut rule.nodes, registry),
            Node::AtRule(at_rule) => {
                if let Some(children) = &mut at_rule.nodes {
                    rewrite_animations(children, registry);
                }
            }
            Node::Comment(_) => {}
        }
    }
}

/// Scopes the selector of every style rule under `nodes`.
///
/// Rules directly inside a keyframes block are keyframe selectors
/// (`from`, `50%`) and are left alone. `in_rule` is set below a style rule,
/// where selectors are relative to their parent.
fn scope_rules(
    nodes: &mut [Node],
    in_keyframes: bool,
    in_rule: bool,
    registry: &mut Registry,
) -> Result<()> {
    for node in nodes {
        match node {
            Node::Rule(rule) => {
                if !in_keyframes {
                    scope_rule(rule, in_rule, registry)?;
                }
                scope_rules(&mut rule.nodes, false, true, registry)?;
            }
            Node::AtRule(at_rule) => {
                let keyframes = at_rule.is_keyframes();
                if let Some(children) = &mut at_rule.nodes {
                    scope_rules(children, keyframes, in_rule, registry)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn scope_rule(rule: &mut Rule, nested: bool, registry: &mut Registry) -> Result<()> {
    let location = Location::new(rule.position, rule.selector.as_str());
    let parsed = if nested {
        parse_relative_selector(&rule.selector)
    } else {
        parse_selector(&rule.selector)
    };
    let mut selector = parsed.map_err(|source| ScopeError::SelectorParse {
        location: location.clone(),
        source,
    })?;

    scope_selector(&mut selector, false, registry, &location)?;

    let scoped = selector.to_string();
    log::trace!("{} -> {}", rule.selector, scoped);
    rule.selector = scoped;
    Ok(())
}

fn is_scope_pseudo(name: &str) -> bool {
    name.eq_ignore_ascii_case("local") || name.eq_ignore_ascii_case("global")
}

/// Renames classes and ids under `selector` unless `global` is set.
///
/// A `:local(X)` or `:global(X)` node is replaced in its parent's slot by
/// `X`; everything under `:global(X)` stays unscoped.
fn scope_selector(
    selector: &mut Selector,
    global: bool,
    registry: &mut Registry,
    location: &Location,
) -> Result<()> {
    match selector {
        Selector::Class(name) | Selector::Id(name) => {
            if !global {
                *name = registry.retrieve_local(name).local().to_string();
            }
        }
        Selector::PseudoClass(pseudo) if is_scope_pseudo(&pseudo.name) => {
            // Bare `:local` and empty `:local()` carry nothing to splice.
            if pseudo.argument.as_deref().is_none_or(str::is_empty) {
                return Ok(());
            }
            let marks_global = pseudo.name.eq_ignore_ascii_case("global");
            let inner = match pseudo.selector.take() {
                Some(inner) if !matches!(*inner, Selector::List(_)) => inner,
                _ => {
                    return Err(ScopeError::InvalidScopePseudo {
                        pseudo: pseudo.name.to_ascii_lowercase(),
                        location: location.clone(),
                    });
                }
            };
            *selector = *inner;
            scope_selector(selector, global || marks_global, registry, location)?;
        }
        Selector::PseudoClass(pseudo) | Selector::PseudoElement(pseudo) => {
            if let Some(inner) = &mut pseudo.selector {
                scope_selector(inner, global, registry, location)?;
            }
        }
        Selector::Compound(parts) | Selector::List(parts) => {
            for part in parts {
                scope_selector(part, global, registry, location)?;
            }
        }
        Selector::Complex { left, right, .. } => {
            scope_selector(left, global, registry, location)?;
            scope_selector(right, global, registry, location)?;
        }
        Selector::Relative { selector, .. } => {
            scope_selector(selector, global, registry, location)?;
        }
        Selector::Type(_) | Selector::Universal | Selector::Nesting | Selector::Attribute(_) => {}
    }
    Ok(())
}
