//! Event contexts returned by [`Session::wait_on_event`](crate::session::Session::wait_on_event).

use crate::{
    attributes::{self, AttrId, AttrValue},
    enums::event::EventType,
    library::VisaLibrary,
    sys as vs, Error, Result,
};
use std::{fmt, sync::Arc};

/// An event occurrence. Its context is closed on drop.
pub struct Event {
    lib: Arc<VisaLibrary>,
    context: vs::ViEvent,
    kind: EventType,
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("context", &self.context)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Event {
    pub(crate) fn new(
        lib: Arc<VisaLibrary>,
        context: vs::ViEvent,
        kind: vs::ViEventType,
    ) -> Result<Self> {
        match EventType::try_from(kind) {
            Ok(kind) => Ok(Self { lib, context, kind }),
            Err(_) => {
                // nobody else will close it
                let _ = lib.call(context, |raw| raw.close(context));
                lib.forget(context);
                Err(Error::TypeMismatch {
                    name: "VI_ATTR_EVENT_TYPE",
                    expected: "a known event type",
                    found: format!("{kind:#010X}"),
                })
            }
        }
    }

    pub fn kind(&self) -> EventType {
        self.kind
    }

    pub fn context(&self) -> vs::ViEvent {
        self.context
    }

    /// Reads an attribute of the event context. Only attributes defined for
    /// this event type are accepted.
    pub fn get_attribute(&self, id: AttrId) -> Result<AttrValue> {
        let desc = attributes::builtin().descriptor(id)?;
        if !desc.applies_to_event(self.kind) {
            return Err(Error::NotApplicable {
                name: desc.name,
                target: format!("{:?}", self.kind),
            });
        }
        attributes::builtin().get(&self.lib, self.context, id)
    }

    pub fn attribute<T>(&self, id: AttrId) -> Result<T>
    where
        T: TryFrom<AttrValue, Error = Error>,
    {
        T::try_from(self.get_attribute(id)?)
    }
}

impl PartialEq<EventType> for Event {
    fn eq(&self, other: &EventType) -> bool {
        self.kind.eq(other)
    }
}

impl Drop for Event {
    fn drop(&mut self) {
        let context = self.context;
        if let Err(e) = self.lib.call(context, |raw| raw.close(context)) {
            log::warn!("closing event context {context}: {e}");
        }
        self.lib.forget(context);
    }
}
