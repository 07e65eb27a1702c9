//! Component updates
//!
//! A [`ComponentUpdateValue`] holds one slot per component field and one
//! payload list per event. A slot is in one of three states:
//!
//! - unset (`None`): the field is untouched and not written
//! - present: the field is written with the held value
//! - cleared: present holding the empty value of an option, list or map;
//!   written as a cleared field id instead of a value
//!
//! Decoding reverses this: a field with values is present, a cleared field id
//! without values restores the empty value, anything else stays unset.

use crate::codec::{component_type, decode_field, decode_record_at, encode_field, encode_record};
use crate::error::{DecodeError, UpdateError};
use crate::schema_object::{ComponentUpdate, SchemaObject, SchemaValue};
use crate::value::{FieldValue, Record, check_multiplicity};
use schemabind_core::{Bundle, ComponentId, FieldId, Multiplicity, TypeDescription};
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    name: String,
    field_id: FieldId,
    multiplicity: Multiplicity,
    value: Option<FieldValue>,
}

#[derive(Debug, Clone, PartialEq)]
struct EventSlot {
    name: String,
    index: u32,
    payload_type: String,
    payloads: Vec<Record>,
}

/// A sparse delta over a component's fields plus pending events.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentUpdateValue {
    type_name: String,
    component_id: ComponentId,
    slots: Vec<Slot>,
    events: Vec<EventSlot>,
}

impl ComponentUpdateValue {
    /// An update with every slot unset and no events.
    pub fn new(bundle: &Bundle, type_name: &str) -> Result<Self, DecodeError> {
        let (ty, component_id) = component_type(bundle, type_name)?;
        Ok(Self::empty(ty, component_id))
    }

    fn empty(ty: &TypeDescription, component_id: ComponentId) -> Self {
        Self {
            type_name: ty.qualified_name.clone(),
            component_id,
            slots: ty
                .fields
                .iter()
                .map(|field| Slot {
                    name: field.name.clone(),
                    field_id: field.field_id,
                    multiplicity: field.multiplicity(),
                    value: None,
                })
                .collect(),
            events: ty
                .events()
                .iter()
                .map(|event| EventSlot {
                    name: event.name.clone(),
                    index: event.index,
                    payload_type: event.payload.clone(),
                    payloads: Vec::new(),
                })
                .collect(),
        }
    }

    /// An update with every slot set from a full component record.
    pub fn from_initial_data(bundle: &Bundle, record: &Record) -> Result<Self, UpdateError> {
        let mut update = Self::new(bundle, &record.type_name)?;
        for slot in &mut update.slots {
            let value = record.get(&slot.name).ok_or_else(|| UpdateError::MissingField {
                type_name: record.type_name.clone(),
                field: slot.name.clone(),
            })?;
            check_multiplicity(&record.type_name, &slot.name, slot.multiplicity, value)?;
            slot.value = Some(value.clone());
        }
        Ok(update)
    }

    /// The full record, if every slot is set.
    pub fn to_initial_data(&self) -> Result<Record, UpdateError> {
        let mut record = Record::new(self.type_name.clone());
        for slot in &self.slots {
            let value = slot.value.clone().ok_or_else(|| UpdateError::MissingField {
                type_name: self.type_name.clone(),
                field: slot.name.clone(),
            })?;
            record = record.with_field(slot.name.clone(), slot.field_id, value);
        }
        Ok(record)
    }

    /// Overwrite the fields of `record` whose slots are set.
    pub fn apply_to(&self, record: &mut Record) -> Result<(), UpdateError> {
        if record.type_name != self.type_name {
            return Err(UpdateError::WrongType {
                expected: self.type_name.clone(),
                found: record.type_name.clone(),
            });
        }
        for slot in &self.slots {
            if let Some(value) = &slot.value {
                record.set(&slot.name, value.clone())?;
            }
        }
        Ok(())
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn component_id(&self) -> ComponentId {
        self.component_id
    }

    /// The slot of a field: `None` when unset.
    pub fn field(&self, name: &str) -> Result<Option<&FieldValue>, UpdateError> {
        Ok(self.slot(name)?.value.as_ref())
    }

    pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), UpdateError> {
        let type_name = self.type_name.clone();
        let slot = self.slot_mut(name)?;
        check_multiplicity(&type_name, name, slot.multiplicity, &value)?;
        slot.value = Some(value);
        Ok(())
    }

    /// Mark an option, list or map field as explicitly cleared.
    pub fn clear_field(&mut self, name: &str) -> Result<(), UpdateError> {
        let type_name = self.type_name.clone();
        let slot = self.slot_mut(name)?;
        let empty = FieldValue::empty(slot.multiplicity).ok_or_else(|| UpdateError::NotClearable {
            type_name,
            field: name.to_string(),
        })?;
        slot.value = Some(empty);
        Ok(())
    }

    /// Return a field to the untouched state.
    pub fn unset_field(&mut self, name: &str) -> Result<(), UpdateError> {
        self.slot_mut(name)?.value = None;
        Ok(())
    }

    pub fn add_event(&mut self, name: &str, payload: Record) -> Result<(), UpdateError> {
        let event = self.event_mut(name)?;
        if payload.type_name != event.payload_type {
            return Err(UpdateError::WrongType {
                expected: event.payload_type.clone(),
                found: payload.type_name,
            });
        }
        event.payloads.push(payload);
        Ok(())
    }

    pub fn events(&self, name: &str) -> Result<&[Record], UpdateError> {
        self.events
            .iter()
            .find(|event| event.name == name)
            .map(|event| event.payloads.as_slice())
            .ok_or_else(|| self.unknown_event(name))
    }

    /// No set slots and no events.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.value.is_none())
            && self.events.iter().all(|event| event.payloads.is_empty())
    }

    /// Write the update: set values as fields, cleared slots as cleared ids,
    /// events as objects under their index.
    pub fn encode(&self) -> ComponentUpdate {
        let mut update = ComponentUpdate::new(self.component_id);
        for slot in &self.slots {
            match &slot.value {
                Some(value) if value.is_cleared() => update.add_cleared_field(slot.field_id),
                Some(value) => encode_field(update.fields_mut(), slot.field_id, value),
                None => {}
            }
        }
        for event in &self.events {
            for payload in &event.payloads {
                let mut object = SchemaObject::new();
                encode_record(payload, &mut object);
                update.events_mut().add_object(event.index, object);
            }
        }
        trace!(
            type_name = %self.type_name,
            cleared = update.cleared_fields().count(),
            "encoded component update"
        );
        update
    }

    /// Read an update of `type_name`.
    pub fn decode(bundle: &Bundle, type_name: &str, update: &ComponentUpdate) -> Result<Self, DecodeError> {
        let (ty, component_id) = component_type(bundle, type_name)?;
        let mut value = Self::empty(ty, component_id);

        for (slot, field) in value.slots.iter_mut().zip(&ty.fields) {
            if update.fields().count(field.field_id) > 0 {
                slot.value = Some(decode_field(bundle, ty, field, update.fields(), 0)?);
            } else if update.is_cleared(field.field_id) {
                slot.value = FieldValue::empty(slot.multiplicity);
            }
        }

        for event in &mut value.events {
            let events = update.events();
            for i in 0..events.count(event.index) {
                let payload = match events.index(event.index, i) {
                    Some(SchemaValue::Object(object)) => decode_record_at(bundle, &event.payload_type, object, 1)?,
                    other => {
                        return Err(DecodeError::TypeMismatch {
                            type_name: type_name.to_string(),
                            field_id: event.index,
                            expected: event.payload_type.clone(),
                            found: other.map_or("nothing", SchemaValue::family),
                        });
                    }
                };
                event.payloads.push(payload);
            }
        }

        Ok(value)
    }

    fn slot(&self, name: &str) -> Result<&Slot, UpdateError> {
        self.slots
            .iter()
            .find(|slot| slot.name == name)
            .ok_or_else(|| self.unknown_field(name))
    }

    fn slot_mut(&mut self, name: &str) -> Result<&mut Slot, UpdateError> {
        let err = self.unknown_field(name);
        self.slots.iter_mut().find(|slot| slot.name == name).ok_or(err)
    }

    fn event_mut(&mut self, name: &str) -> Result<&mut EventSlot, UpdateError> {
        let err = self.unknown_event(name);
        self.events.iter_mut().find(|event| event.name == name).ok_or(err)
    }

    fn unknown_field(&self, name: &str) -> UpdateError {
        UpdateError::UnknownField {
            type_name: self.type_name.clone(),
            field: name.to_string(),
        }
    }

    fn unknown_event(&self, name: &str) -> UpdateError {
        UpdateError::UnknownEvent {
            type_name: self.type_name.clone(),
            event: name.to_string(),
        }
    }
}
