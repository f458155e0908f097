//! Building cells and actors from level data.
//!
//! Level data names each object by a numeric *slot* and configures it with
//! named attributes. The [`ComponentRegistry`] maps slots to factory
//! functions; each kind publishes a static table of the attributes it
//! understands, which [`Attributes::set_attribute`] checks before writing.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use tessera_core::cell::{CellKind, KeyColor};
//! use tessera_core::registry::{
//!     slots, AttributeValue, ComponentRegistry, ComponentSpec, Placeable,
//! };
//!
//! let registry = ComponentRegistry::standard();
//! let spec = ComponentSpec {
//!     row: 2,
//!     column: 5,
//!     slot: slots::DOOR,
//!     params: BTreeMap::from([("color".to_string(), AttributeValue::Color(KeyColor::Green))]),
//! };
//!
//! let Placeable::Cell(door) = registry.create(&spec).unwrap() else {
//!     panic!("doors are cells");
//! };
//! assert_eq!(door.kind(), CellKind::Door { color: KeyColor::Green });
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actor::{Actor, ActorKind, Immunity, ItemKind};
use crate::cell::{Cell, CellKind, KeyColor};
use crate::error::ConfigError;
use crate::location::{Direction, Location};

// =============================================================================
// Attribute values
// =============================================================================

/// Declared type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeType {
    /// Signed integer of any width.
    Int,
    /// Flag.
    Bool,
    /// Free text or a named variant.
    Text,
    /// Compass direction.
    Direction,
    /// Key colour.
    Color,
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Text => "text",
            Self::Direction => "direction",
            Self::Color => "color",
        };
        f.write_str(name)
    }
}

/// A typed attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    /// Integer value.
    Int(i64),
    /// Flag value.
    Bool(bool),
    /// Text value.
    Text(String),
    /// Direction value.
    Direction(Direction),
    /// Colour value.
    Color(KeyColor),
}

impl AttributeValue {
    /// The type of this value.
    #[must_use]
    pub const fn ty(&self) -> AttributeType {
        match self {
            Self::Int(_) => AttributeType::Int,
            Self::Bool(_) => AttributeType::Bool,
            Self::Text(_) => AttributeType::Text,
            Self::Direction(_) => AttributeType::Direction,
            Self::Color(_) => AttributeType::Color,
        }
    }
}

/// One entry of a kind's attribute table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDecl {
    /// Attribute name as used in level data.
    pub name: &'static str,
    /// Accepted value type.
    pub ty: AttributeType,
    /// Whether level data may set it.
    pub writable: bool,
}

const fn decl(name: &'static str, ty: AttributeType, writable: bool) -> AttributeDecl {
    AttributeDecl { name, ty, writable }
}

// =============================================================================
// Attribute tables
// =============================================================================

const CELL_ATTRIBUTES: &[AttributeDecl] = &[
    decl("kind", AttributeType::Text, false),
    decl("frame", AttributeType::Int, true),
];

const DOOR_ATTRIBUTES: &[AttributeDecl] = &[
    decl("kind", AttributeType::Text, false),
    decl("frame", AttributeType::Int, true),
    decl("color", AttributeType::Color, true),
];

const ACTOR_ATTRIBUTES: &[AttributeDecl] = &[
    decl("kind", AttributeType::Text, false),
    decl("alive", AttributeType::Bool, false),
    decl("heading", AttributeType::Direction, true),
    decl("water_immune", AttributeType::Bool, true),
    decl("fire_immune", AttributeType::Bool, true),
];

const PLAYER_ATTRIBUTES: &[AttributeDecl] = &[
    decl("kind", AttributeType::Text, false),
    decl("alive", AttributeType::Bool, false),
    decl("heading", AttributeType::Direction, true),
    decl("water_immune", AttributeType::Bool, true),
    decl("fire_immune", AttributeType::Bool, true),
    decl("chips", AttributeType::Int, false),
];

const KEY_ATTRIBUTES: &[AttributeDecl] = &[
    decl("kind", AttributeType::Text, false),
    decl("alive", AttributeType::Bool, false),
    decl("heading", AttributeType::Direction, true),
    decl("color", AttributeType::Color, true),
];

const BOOTS_ATTRIBUTES: &[AttributeDecl] = &[
    decl("kind", AttributeType::Text, false),
    decl("alive", AttributeType::Bool, false),
    decl("heading", AttributeType::Direction, true),
    decl("protects", AttributeType::Text, true),
];

const FACTORY_ATTRIBUTES: &[AttributeDecl] = &[
    decl("kind", AttributeType::Text, false),
    decl("alive", AttributeType::Bool, false),
    decl("heading", AttributeType::Direction, true),
    decl("period", AttributeType::Int, true),
    decl("spawns", AttributeType::Text, true),
];

/// Named, typed, table-checked configuration.
pub trait Attributes {
    /// Kind name used in error messages.
    fn component_name(&self) -> &'static str;

    /// The attribute table for this object's kind.
    fn attributes(&self) -> &'static [AttributeDecl];

    /// Reads an attribute, `None` if the kind has no such attribute.
    fn get_attribute(&self, name: &str) -> Option<AttributeValue>;

    /// Writes an attribute already checked against the table.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the value is unusable for the attribute.
    fn write_attribute(&mut self, name: &str, value: AttributeValue) -> Result<(), ConfigError>;

    /// Checks `value` against the table and writes it.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownAttribute`], [`ConfigError::ReadOnlyAttribute`]
    /// or [`ConfigError::AttributeType`] when the table rejects the write,
    /// or whatever [`write_attribute`](Self::write_attribute) reports.
    fn set_attribute(&mut self, name: &str, value: AttributeValue) -> Result<(), ConfigError> {
        let Some(decl) = self.attributes().iter().find(|decl| decl.name == name) else {
            return Err(ConfigError::UnknownAttribute {
                component: self.component_name(),
                name: name.to_string(),
            });
        };
        if !decl.writable {
            return Err(ConfigError::ReadOnlyAttribute {
                component: self.component_name(),
                name: name.to_string(),
            });
        }
        if decl.ty != value.ty() {
            return Err(ConfigError::AttributeType {
                name: name.to_string(),
                expected: decl.ty,
                found: value.ty(),
            });
        }
        self.write_attribute(name, value)
    }
}

impl Attributes for Cell {
    fn component_name(&self) -> &'static str {
        self.kind().name()
    }

    fn attributes(&self) -> &'static [AttributeDecl] {
        match self.kind() {
            CellKind::Door { .. } => DOOR_ATTRIBUTES,
            _ => CELL_ATTRIBUTES,
        }
    }

    fn get_attribute(&self, name: &str) -> Option<AttributeValue> {
        match (name, self.kind()) {
            ("kind", kind) => Some(AttributeValue::Text(kind.name().to_string())),
            ("frame", _) => i64::try_from(self.component().current_frame())
                .ok()
                .map(AttributeValue::Int),
            ("color", CellKind::Door { color }) => Some(AttributeValue::Color(color)),
            _ => None,
        }
    }

    fn write_attribute(&mut self, name: &str, value: AttributeValue) -> Result<(), ConfigError> {
        match (name, value) {
            ("frame", AttributeValue::Int(frame)) => {
                let index = usize::try_from(frame).map_err(|_| ConfigError::AttributeRange {
                    name: name.to_string(),
                    value: frame,
                })?;
                self.component_mut().set_frame(index)
            }
            ("color", AttributeValue::Color(new_color)) => {
                if let CellKind::Door { color } = self.kind_mut() {
                    *color = new_color;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Inverse of [`template_named`]. None for templates it cannot build.
fn template_name(template: &Actor) -> Option<&'static str> {
    match template.kind() {
        ActorKind::Roamer => Some("roamer"),
        ActorKind::Block => Some("block"),
        ActorKind::Bouncer => Some("bouncer"),
        ActorKind::Projectile => Some("projectile"),
        _ => None,
    }
}

fn template_named(name: &str) -> Option<Actor> {
    let kind = match name {
        "roamer" => ActorKind::Roamer,
        "bouncer" => ActorKind::Bouncer,
        "projectile" => ActorKind::Projectile,
        "block" => ActorKind::Block,
        _ => return None,
    };
    Some(Actor::new(kind))
}

fn immunity_named(name: &str) -> Option<Immunity> {
    match name {
        "water" => Some(Immunity::WATER),
        "fire" => Some(Immunity::FIRE),
        "all" => Some(Immunity::all()),
        _ => None,
    }
}

impl Attributes for Actor {
    fn component_name(&self) -> &'static str {
        match self.kind() {
            ActorKind::Player { .. } => "Player",
            ActorKind::Block => "Block",
            ActorKind::Roamer => "Roamer",
            ActorKind::Bouncer => "Bouncer",
            ActorKind::Projectile => "Projectile",
            ActorKind::Item(ItemKind::Key { .. }) => "Key",
            ActorKind::Item(ItemKind::Chip) => "Chip",
            ActorKind::Item(ItemKind::Boots { .. }) => "Boots",
            ActorKind::Factory { .. } => "Factory",
        }
    }

    fn attributes(&self) -> &'static [AttributeDecl] {
        match self.kind() {
            ActorKind::Player { .. } => PLAYER_ATTRIBUTES,
            ActorKind::Item(ItemKind::Key { .. }) => KEY_ATTRIBUTES,
            ActorKind::Item(ItemKind::Boots { .. }) => BOOTS_ATTRIBUTES,
            ActorKind::Factory { .. } => FACTORY_ATTRIBUTES,
            ActorKind::Item(ItemKind::Chip) => &ACTOR_ATTRIBUTES[..3],
            _ => ACTOR_ATTRIBUTES,
        }
    }

    fn get_attribute(&self, name: &str) -> Option<AttributeValue> {
        if !self.attributes().iter().any(|decl| decl.name == name) {
            return None;
        }
        let value = match (name, self.kind()) {
            ("kind", _) => AttributeValue::Text(self.component_name().to_string()),
            ("alive", _) => AttributeValue::Bool(self.is_alive()),
            ("heading", _) => AttributeValue::Direction(self.heading()),
            ("water_immune", _) => {
                AttributeValue::Bool(self.innate_immunity().contains(Immunity::WATER))
            }
            ("fire_immune", _) => AttributeValue::Bool(self.innate_immunity().contains(Immunity::FIRE)),
            ("chips", ActorKind::Player { inventory }) => {
                AttributeValue::Int(i64::from(inventory.chips()))
            }
            ("color", ActorKind::Item(ItemKind::Key { color })) => AttributeValue::Color(*color),
            ("protects", ActorKind::Item(ItemKind::Boots { immunity })) => {
                let name = if *immunity == Immunity::all() {
                    "all"
                } else if immunity.contains(Immunity::FIRE) {
                    "fire"
                } else {
                    "water"
                };
                AttributeValue::Text(name.to_string())
            }
            ("period", ActorKind::Factory { period, .. }) => AttributeValue::Int(i64::from(*period)),
            ("spawns", ActorKind::Factory { template, .. }) => {
                AttributeValue::Text(template_name(template)?.to_string())
            }
            _ => return None,
        };
        Some(value)
    }

    fn write_attribute(&mut self, name: &str, value: AttributeValue) -> Result<(), ConfigError> {
        match (name, value) {
            ("heading", AttributeValue::Direction(direction)) => self.set_heading(direction),
            ("water_immune", AttributeValue::Bool(on)) => {
                let mut immunity = self.innate_immunity();
                immunity.set(Immunity::WATER, on);
                self.set_immunity(immunity);
            }
            ("fire_immune", AttributeValue::Bool(on)) => {
                let mut immunity = self.innate_immunity();
                immunity.set(Immunity::FIRE, on);
                self.set_immunity(immunity);
            }
            ("color", AttributeValue::Color(new_color)) => {
                if let ActorKind::Item(ItemKind::Key { color }) = self.kind_mut() {
                    *color = new_color;
                }
            }
            ("protects", AttributeValue::Text(text)) => {
                let protects = immunity_named(&text).ok_or_else(|| ConfigError::InvalidValue {
                    name: name.to_string(),
                    value: text.clone(),
                })?;
                if let ActorKind::Item(ItemKind::Boots { immunity }) = self.kind_mut() {
                    *immunity = protects;
                }
            }
            ("period", AttributeValue::Int(value)) => {
                let frames = u32::try_from(value).map_err(|_| ConfigError::AttributeRange {
                    name: name.to_string(),
                    value,
                })?;
                if let ActorKind::Factory { period, .. } = self.kind_mut() {
                    *period = frames;
                }
            }
            ("spawns", AttributeValue::Text(text)) => {
                let spawn = template_named(&text).ok_or_else(|| ConfigError::InvalidValue {
                    name: name.to_string(),
                    value: text.clone(),
                })?;
                if let ActorKind::Factory { template, .. } = self.kind_mut() {
                    **template = spawn;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

// =============================================================================
// Registry
// =============================================================================

/// A freshly built object, ready for placement.
#[derive(Debug, Clone, PartialEq)]
pub enum Placeable {
    /// Terrain.
    Cell(Cell),
    /// An actor.
    Actor(Actor),
}

impl Placeable {
    fn attributes_mut(&mut self) -> &mut dyn Attributes {
        match self {
            Self::Cell(cell) => cell,
            Self::Actor(actor) => actor,
        }
    }
}

/// Builds a default object of one kind.
pub type ComponentFactory = fn() -> Placeable;

/// One object of level data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    /// Row to place at.
    pub row: i32,
    /// Column to place at.
    pub column: i32,
    /// Registry slot naming the kind.
    pub slot: u16,
    /// Attribute values applied after construction.
    #[serde(default)]
    pub params: BTreeMap<String, AttributeValue>,
}

impl ComponentSpec {
    /// Spec with no parameters.
    #[must_use]
    pub fn new(row: i32, column: i32, slot: u16) -> Self {
        Self {
            row,
            column,
            slot,
            params: BTreeMap::new(),
        }
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with(mut self, name: &str, value: AttributeValue) -> Self {
        self.params.insert(name.to_string(), value);
        self
    }

    /// Where the object goes.
    #[must_use]
    pub const fn location(&self) -> Location {
        Location::new(self.row, self.column)
    }
}

/// Slot numbers used by [`ComponentRegistry::standard`].
pub mod slots {
    /// Floor cell.
    pub const FLOOR: u16 = 0;
    /// Wall cell.
    pub const WALL: u16 = 1;
    /// Water cell.
    pub const WATER: u16 = 2;
    /// Fire cell.
    pub const FIRE: u16 = 3;
    /// Dirt cell.
    pub const DIRT: u16 = 4;
    /// Door cell, red unless configured.
    pub const DOOR: u16 = 5;
    /// Exit cell.
    pub const EXIT: u16 = 6;
    /// The player.
    pub const PLAYER: u16 = 100;
    /// Pushable block.
    pub const BLOCK: u16 = 101;
    /// Random walker.
    pub const ROAMER: u16 = 102;
    /// Back-and-forth walker.
    pub const BOUNCER: u16 = 103;
    /// Projectile.
    pub const PROJECTILE: u16 = 104;
    /// Key, red unless configured.
    pub const KEY: u16 = 105;
    /// Chip.
    pub const CHIP: u16 = 106;
    /// Boots, water unless configured.
    pub const BOOTS: u16 = 107;
    /// Factory, spawning projectiles every 32 frames unless configured.
    pub const FACTORY: u16 = 108;
}

/// Maps slot numbers to factories.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    factories: BTreeMap<u16, ComponentFactory>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in kind at its [`slots`] number.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(slots::FLOOR, || Placeable::Cell(Cell::floor()));
        registry.register(slots::WALL, || Placeable::Cell(Cell::wall()));
        registry.register(slots::WATER, || Placeable::Cell(Cell::new(CellKind::Water)));
        registry.register(slots::FIRE, || Placeable::Cell(Cell::new(CellKind::Fire)));
        registry.register(slots::DIRT, || Placeable::Cell(Cell::new(CellKind::Dirt)));
        registry.register(slots::DOOR, || {
            Placeable::Cell(Cell::new(CellKind::Door {
                color: KeyColor::Red,
            }))
        });
        registry.register(slots::EXIT, || Placeable::Cell(Cell::new(CellKind::Exit)));
        registry.register(slots::PLAYER, || Placeable::Actor(Actor::player()));
        registry.register(slots::BLOCK, || Placeable::Actor(Actor::new(ActorKind::Block)));
        registry.register(slots::ROAMER, || Placeable::Actor(Actor::new(ActorKind::Roamer)));
        registry.register(slots::BOUNCER, || {
            Placeable::Actor(Actor::new(ActorKind::Bouncer))
        });
        registry.register(slots::PROJECTILE, || {
            Placeable::Actor(Actor::new(ActorKind::Projectile))
        });
        registry.register(slots::KEY, || {
            Placeable::Actor(Actor::new(ActorKind::Item(ItemKind::Key {
                color: KeyColor::Red,
            })))
        });
        registry.register(slots::CHIP, || {
            Placeable::Actor(Actor::new(ActorKind::Item(ItemKind::Chip)))
        });
        registry.register(slots::BOOTS, || {
            Placeable::Actor(Actor::new(ActorKind::Item(ItemKind::Boots {
                immunity: Immunity::WATER,
            })))
        });
        registry.register(slots::FACTORY, || {
            Placeable::Actor(Actor::new(ActorKind::Factory {
                template: Box::new(Actor::new(ActorKind::Projectile)),
                period: 32,
            }))
        });
        registry
    }

    /// Registers `factory` under `slot`, returning any factory it replaces.
    pub fn register(&mut self, slot: u16, factory: ComponentFactory) -> Option<ComponentFactory> {
        self.factories.insert(slot, factory)
    }

    /// True if `slot` has a factory.
    #[must_use]
    pub fn contains(&self, slot: u16) -> bool {
        self.factories.contains_key(&slot)
    }

    /// Number of registered slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// True when no slot is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Builds the object described by `spec`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownSlot`] for an unregistered slot, or the first
    /// error raised while applying `spec.params`.
    pub fn create(&self, spec: &ComponentSpec) -> Result<Placeable, ConfigError> {
        let factory = self
            .factories
            .get(&spec.slot)
            .ok_or(ConfigError::UnknownSlot(spec.slot))?;
        let mut placeable = factory();
        let target = placeable.attributes_mut();
        for (name, value) in &spec.params {
            target.set_attribute(name, value.clone())?;
        }
        Ok(placeable)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_actor(spec: &ComponentSpec) -> Actor {
        match ComponentRegistry::standard().create(spec).unwrap() {
            Placeable::Actor(actor) => actor,
            Placeable::Cell(cell) => panic!("expected an actor, got {}", cell.kind()),
        }
    }

    mod create_tests {
        use super::*;

        #[test]
        fn unknown_slot() {
            let registry = ComponentRegistry::standard();
            assert_eq!(
                registry.create(&ComponentSpec::new(0, 0, 999)),
                Err(ConfigError::UnknownSlot(999))
            );
        }

        #[test]
        fn applies_heading() {
            let spec = ComponentSpec::new(0, 0, slots::BOUNCER)
                .with("heading", AttributeValue::Direction(Direction::East));
            assert_eq!(create_actor(&spec).heading(), Direction::East);
        }

        #[test]
        fn factory_template_and_period() {
            let spec = ComponentSpec::new(0, 0, slots::FACTORY)
                .with("spawns", AttributeValue::Text("bouncer".into()))
                .with("period", AttributeValue::Int(12));
            let factory = create_actor(&spec);
            let ActorKind::Factory { template, period } = factory.kind() else {
                panic!("expected a factory");
            };
            assert_eq!(*period, 12);
            assert!(matches!(template.kind(), ActorKind::Bouncer));
        }

        #[test]
        fn custom_registration_replaces_slot() {
            let mut registry = ComponentRegistry::standard();
            let previous = registry.register(slots::FLOOR, || Placeable::Cell(Cell::wall()));
            assert!(previous.is_some());
            let Ok(Placeable::Cell(cell)) = registry.create(&ComponentSpec::new(0, 0, slots::FLOOR))
            else {
                panic!("expected a cell");
            };
            assert_eq!(cell.kind(), CellKind::Wall);
        }
    }

    mod attribute_tests {
        use super::*;

        #[test]
        fn wrong_type_is_rejected() {
            let spec = ComponentSpec::new(0, 0, slots::KEY)
                .with("color", AttributeValue::Int(3));
            assert_eq!(
                ComponentRegistry::standard().create(&spec),
                Err(ConfigError::AttributeType {
                    name: "color".into(),
                    expected: AttributeType::Color,
                    found: AttributeType::Int,
                })
            );
        }

        #[test]
        fn unknown_attribute_is_rejected() {
            let spec = ComponentSpec::new(0, 0, slots::WALL)
                .with("color", AttributeValue::Color(KeyColor::Red));
            assert!(matches!(
                ComponentRegistry::standard().create(&spec),
                Err(ConfigError::UnknownAttribute { component: "Wall", .. })
            ));
        }

        #[test]
        fn read_only_attribute_is_rejected() {
            let spec = ComponentSpec::new(0, 0, slots::PLAYER)
                .with("chips", AttributeValue::Int(5));
            assert!(matches!(
                ComponentRegistry::standard().create(&spec),
                Err(ConfigError::ReadOnlyAttribute { .. })
            ));
        }

        #[test]
        fn negative_period_is_out_of_range() {
            let spec = ComponentSpec::new(0, 0, slots::FACTORY)
                .with("period", AttributeValue::Int(-1));
            assert!(matches!(
                ComponentRegistry::standard().create(&spec),
                Err(ConfigError::AttributeRange { value: -1, .. })
            ));
        }

        #[test]
        fn bad_frame_is_reported() {
            let spec = ComponentSpec::new(0, 0, slots::WATER)
                .with("frame", AttributeValue::Int(9));
            assert!(matches!(
                ComponentRegistry::standard().create(&spec),
                Err(ConfigError::FrameOutOfRange { index: 9, .. })
            ));
        }

        #[test]
        fn unknown_template_name() {
            let spec = ComponentSpec::new(0, 0, slots::FACTORY)
                .with("spawns", AttributeValue::Text("dragon".into()));
            assert!(matches!(
                ComponentRegistry::standard().create(&spec),
                Err(ConfigError::InvalidValue { .. })
            ));
        }

        #[test]
        fn get_reflects_set() {
            let mut actor = Actor::player();
            actor
                .set_attribute("water_immune", AttributeValue::Bool(true))
                .unwrap();
            assert_eq!(
                actor.get_attribute("water_immune"),
                Some(AttributeValue::Bool(true))
            );
            assert_eq!(actor.get_attribute("chips"), Some(AttributeValue::Int(0)));
            assert_eq!(actor.get_attribute("period"), None);
        }

        #[test]
        fn spawns_names_only_buildable_templates() {
            let spec = ComponentSpec::new(0, 0, slots::FACTORY)
                .with("spawns", AttributeValue::Text("roamer".into()));
            let factory = create_actor(&spec);
            assert_eq!(
                factory.get_attribute("spawns"),
                Some(AttributeValue::Text("roamer".into()))
            );

            let chip_factory = Actor::new(ActorKind::Factory {
                template: Box::new(Actor::new(ActorKind::Item(ItemKind::Chip))),
                period: 4,
            });
            assert_eq!(chip_factory.get_attribute("spawns"), None);
            assert_eq!(chip_factory.get_attribute("period"), Some(AttributeValue::Int(4)));
        }

        #[test]
        fn spec_json_roundtrip() {
            let spec = ComponentSpec::new(3, 4, slots::BOOTS)
                .with("protects", AttributeValue::Text("fire".into()));
            let json = serde_json::to_string(&spec).unwrap();
            let back: ComponentSpec = serde_json::from_str(&json).unwrap();
            assert_eq!(back, spec);
            assert!(json.contains(r#""text":"fire""#));
        }
    }
}
