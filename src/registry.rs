//! Dispatch from `(interface type, resource class)` pairs to resource
//! wrappers.
//!
//! A wrapper can only be registered for a pair if it defines every property
//! whose attribute applies to the pair, see
//! [`AttributeRegistry::required_properties`](crate::attributes::AttributeRegistry::required_properties).
//! The built-in registry is filled once, on first use, and can be changed
//! afterwards by registering again:
//!
//! ```
//! use visa_bind::{
//!     enums::interface::{InterfaceType, ResourceClass},
//!     registry::{self, ResourceType},
//!     resources::Resource,
//! };
//! let found = registry::builtin().resolve(InterfaceType::Gpib, ResourceClass::Instr);
//! assert_eq!(found.name, "GpibInstrument");
//! // the generic wrapper lacks the GPIB properties
//! assert!(registry::builtin()
//!     .register(InterfaceType::Gpib, ResourceClass::Instr, ResourceType::of::<Resource>())
//!     .is_err());
//! ```

use crate::{
    attributes::{
        self, ResourcePair, ASRL_INSTR, GPIB_INSTR, GPIB_INTFC, GPIB_VXI_INSTR, PXI_BACKPLANE,
        PXI_INSTR, PXI_MEMACC, TCPIP_INSTR, TCPIP_SOCKET, USB_INSTR, USB_RAW, VXI_BACKPLANE,
        VXI_INSTR, VXI_MEMACC,
    },
    enums::interface::{InterfaceType, ResourceClass},
    resources::*,
    session::Session,
    Error, Result,
};
use dashmap::DashMap;
use once_cell::sync::Lazy;

/// A wrapper type as seen by the registry.
#[derive(Debug, Clone, Copy)]
pub struct ResourceType {
    pub name: &'static str,
    /// Properties defined by the wrapper, grouped as its attribute traits.
    pub properties: &'static [&'static [&'static str]],
    construct: fn(Session) -> Box<dyn VisaResource>,
}

fn construct<T: FromSession>(session: Session) -> Box<dyn VisaResource> {
    Box::new(T::from_session(session))
}

impl ResourceType {
    pub fn new(
        name: &'static str,
        properties: &'static [&'static [&'static str]],
        construct: fn(Session) -> Box<dyn VisaResource>,
    ) -> Self {
        Self {
            name,
            properties,
            construct,
        }
    }

    pub fn of<T: FromSession>() -> Self {
        Self::new(T::NAME, T::PROPERTIES, construct::<T>)
    }

    pub fn defines(&self, property: &str) -> bool {
        self.properties.iter().any(|group| group.contains(&property))
    }

    /// Checks that the wrapper defines every property `interface`/`class`
    /// requires, naming the first one missing.
    pub fn check(&self, interface: InterfaceType, class: ResourceClass) -> Result<()> {
        let required = attributes::builtin().required_properties(interface, class);
        match required.into_iter().find(|p| !self.defines(p)) {
            Some(property) => Err(Error::MissingProperty {
                wrapper: self.name,
                property,
                interface,
                class,
            }),
            None => Ok(()),
        }
    }

    /// Wraps an open session.
    pub fn construct(&self, session: Session) -> Box<dyn VisaResource> {
        (self.construct)(session)
    }
}

/// Wrapper types by resource pair.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    types: DashMap<ResourcePair, ResourceType>,
}

impl ClassRegistry {
    /// An empty registry, every pair resolves to [`Resource`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `interface`/`class` to `ty`, replacing any earlier mapping.
    ///
    /// Fails with [`Error::MissingProperty`] if `ty` does not pass
    /// [`ResourceType::check`].
    pub fn register(
        &self,
        interface: InterfaceType,
        class: ResourceClass,
        ty: ResourceType,
    ) -> Result<()> {
        ty.check(interface, class)?;
        if let Some(old) = self.types.insert((interface, class), ty) {
            log::warn!(
                "{interface} {class} re-registered: {} replaces {}",
                ty.name,
                old.name
            );
        }
        Ok(())
    }

    /// Wrapper registered for the pair, [`Resource`] if there is none.
    pub fn resolve(&self, interface: InterfaceType, class: ResourceClass) -> ResourceType {
        match self.types.get(&(interface, class)) {
            Some(ty) => *ty,
            None => {
                log::warn!("no wrapper registered for {interface} {class}, using Resource");
                ResourceType::of::<Resource>()
            }
        }
    }

    pub fn is_registered(&self, interface: InterfaceType, class: ResourceClass) -> bool {
        self.types.contains_key(&(interface, class))
    }

    /// Registered pairs and the names of their wrappers.
    pub fn registered(&self) -> Vec<(ResourcePair, &'static str)> {
        self.types.iter().map(|e| (*e.key(), e.value().name)).collect()
    }
}

fn builtin_types() -> [(ResourcePair, ResourceType); 14] {
    [
        (GPIB_INSTR, ResourceType::of::<GpibInstrument>()),
        (GPIB_INTFC, ResourceType::of::<GpibInterface>()),
        (ASRL_INSTR, ResourceType::of::<SerialInstrument>()),
        (TCPIP_INSTR, ResourceType::of::<TcpipInstrument>()),
        (TCPIP_SOCKET, ResourceType::of::<TcpipSocket>()),
        (USB_INSTR, ResourceType::of::<UsbInstrument>()),
        (USB_RAW, ResourceType::of::<UsbRaw>()),
        (VXI_INSTR, ResourceType::of::<VxiInstrument>()),
        (VXI_MEMACC, ResourceType::of::<VxiMemacc>()),
        (VXI_BACKPLANE, ResourceType::of::<VxiBackplane>()),
        (GPIB_VXI_INSTR, ResourceType::of::<VxiInstrument>()),
        (PXI_INSTR, ResourceType::of::<PxiInstrument>()),
        (PXI_MEMACC, ResourceType::of::<PxiMemacc>()),
        (PXI_BACKPLANE, ResourceType::of::<PxiBackplane>()),
    ]
}

static BUILTIN_REGISTRY: Lazy<ClassRegistry> = Lazy::new(|| {
    let registry = ClassRegistry::new();
    for ((interface, class), ty) in builtin_types() {
        registry
            .register(interface, class, ty)
            .expect("built-in wrappers define every property of their pair");
    }
    registry
});

/// Registry used by [`ResourceManager::open_resource`](crate::rm::ResourceManager::open_resource).
pub fn builtin() -> &'static ClassRegistry {
    &BUILTIN_REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_registration_passes() {
        let registry = ClassRegistry::new();
        for ((interface, class), ty) in builtin_types() {
            registry.register(interface, class, ty).unwrap();
        }
        assert_eq!(registry.registered().len(), 14);
    }

    const SERIAL_ONLY: &[&[&str]] = &[
        <Resource as ResourceAttributes>::PROPERTIES,
        &["baud_rate"],
    ];

    #[test]
    fn missing_property_is_named() {
        let incomplete = ResourceType::new("Incomplete", SERIAL_ONLY, construct::<Resource>);
        let err = ClassRegistry::new()
            .register(InterfaceType::Asrl, ResourceClass::Instr, incomplete)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingProperty {
                wrapper: "Incomplete",
                property: "send_end",
                ..
            }
        ));
    }

    #[test]
    fn unknown_pairs_fall_back() {
        let registry = ClassRegistry::new();
        assert!(!registry.is_registered(InterfaceType::Vxi, ResourceClass::Servant));
        assert_eq!(
            registry.resolve(InterfaceType::Vxi, ResourceClass::Servant).name,
            "Resource"
        );
    }

    #[test]
    fn extra_properties_are_fine() {
        let registry = ClassRegistry::new();
        registry
            .register(
                InterfaceType::Pxi,
                ResourceClass::Memacc,
                ResourceType::of::<VxiInstrument>(),
            )
            .unwrap();
        registry
            .register(
                InterfaceType::Pxi,
                ResourceClass::Memacc,
                ResourceType::of::<PxiMemacc>(),
            )
            .unwrap();
        assert_eq!(
            registry.resolve(InterfaceType::Pxi, ResourceClass::Memacc).name,
            "PxiMemacc"
        );
    }
}
