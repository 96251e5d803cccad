// buslog - core/event.rs
//
// Closed set of events the logger understands, one variant per event name,
// each with its typed payload. Scripts and hosts encode events as
// `{"event": "<name>", "args": <payload>}`.

use crate::core::duration::HrTime;
use crate::core::message::LogMessage;
use serde::Deserialize;

/// Event names as published on the bus.
pub mod names {
    pub const ERROR: &str = "error";
    pub const WARN: &str = "warn";
    pub const INFO: &str = "info";
    pub const DEBUG: &str = "debug";
    pub const TRACE: &str = "trace";

    pub const COMPONENT_LOADED: &str = "componentLoaded";
    pub const STORE_LOADED: &str = "storeLoaded";
    pub const ALL_STORES_LOADED: &str = "allStoresLoaded";
    pub const ALL_COMPONENTS_LOADED: &str = "allComponentsLoaded";

    pub const COMPONENT_RENDER: &str = "componentRender";
    pub const COMPONENT_RENDERED: &str = "componentRendered";
    pub const DOCUMENT_RENDERED: &str = "documentRendered";

    pub const STORE_FOUND: &str = "storeFound";
    pub const COMPONENT_FOUND: &str = "componentFound";
    pub const APP_DEFINITIONS_BUILT: &str = "appDefinitionsBuilt";
    pub const APP_BUNDLE_BUILT: &str = "appBundleBuilt";
    pub const EXTERNALS_BUNDLE_BUILT: &str = "externalsBundleBuilt";
    pub const APP_BUNDLE_CHANGED: &str = "appBundleChanged";

    pub const DOCUMENT_UPDATED: &str = "documentUpdated";
    pub const COMPONENT_BOUND: &str = "componentBound";
    pub const COMPONENT_UNBOUND: &str = "componentUnbound";
}

/// An event published on the bus.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "args", rename_all = "camelCase")]
pub enum BusEvent {
    Error(LogMessage),
    Warn(LogMessage),
    Info(LogMessage),
    Debug(LogMessage),
    Trace(LogMessage),

    ComponentLoaded(Named),
    StoreLoaded(Named),
    AllStoresLoaded,
    AllComponentsLoaded,

    ComponentRender(ComponentRender),
    ComponentRendered(ComponentRendered),
    DocumentRendered(DocumentRendered),

    StoreFound(Found),
    ComponentFound(Found),
    AppDefinitionsBuilt(DefinitionsBuilt),
    AppBundleBuilt(BundleBuilt),
    ExternalsBundleBuilt(BundleBuilt),
    AppBundleChanged(BundleChanged),

    /// Names of the stores whose change triggered the update.
    DocumentUpdated(Vec<String>),
    ComponentBound(BoundElement),
    ComponentUnbound(BoundElement),
}

impl BusEvent {
    /// The name this event is published under.
    pub fn name(&self) -> &'static str {
        match self {
            BusEvent::Error(_) => names::ERROR,
            BusEvent::Warn(_) => names::WARN,
            BusEvent::Info(_) => names::INFO,
            BusEvent::Debug(_) => names::DEBUG,
            BusEvent::Trace(_) => names::TRACE,
            BusEvent::ComponentLoaded(_) => names::COMPONENT_LOADED,
            BusEvent::StoreLoaded(_) => names::STORE_LOADED,
            BusEvent::AllStoresLoaded => names::ALL_STORES_LOADED,
            BusEvent::AllComponentsLoaded => names::ALL_COMPONENTS_LOADED,
            BusEvent::ComponentRender(_) => names::COMPONENT_RENDER,
            BusEvent::ComponentRendered(_) => names::COMPONENT_RENDERED,
            BusEvent::DocumentRendered(_) => names::DOCUMENT_RENDERED,
            BusEvent::StoreFound(_) => names::STORE_FOUND,
            BusEvent::ComponentFound(_) => names::COMPONENT_FOUND,
            BusEvent::AppDefinitionsBuilt(_) => names::APP_DEFINITIONS_BUILT,
            BusEvent::AppBundleBuilt(_) => names::APP_BUNDLE_BUILT,
            BusEvent::ExternalsBundleBuilt(_) => names::EXTERNALS_BUNDLE_BUILT,
            BusEvent::AppBundleChanged(_) => names::APP_BUNDLE_CHANGED,
            BusEvent::DocumentUpdated(_) => names::DOCUMENT_UPDATED,
            BusEvent::ComponentBound(_) => names::COMPONENT_BOUND,
            BusEvent::ComponentUnbound(_) => names::COMPONENT_UNBOUND,
        }
    }
}

// =============================================================================
// Payloads
// =============================================================================

/// Payload carrying only a component or store name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Named {
    pub name: String,
}

/// A component or store discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Found {
    pub name: String,
    pub path: String,
}

/// A component render starting. `name` may be missing for anonymous
/// components; `id` is the element's id attribute.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct ComponentRender {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// A component render finished, optionally with its timing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRendered {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub hr_time: Option<HrTime>,
}

/// The whole document was rendered for a location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentRendered {
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionsBuilt {
    pub hr_time: HrTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleBuilt {
    pub path: String,
    pub hr_time: HrTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleChanged {
    pub changed_files: Vec<String>,
}

/// An element a component was bound to or unbound from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundElement {
    pub tag_name: String,
    #[serde(default)]
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_event() {
        let event: BusEvent =
            serde_json::from_str(r#"{"event":"componentLoaded","args":{"name":"x"}}"#).unwrap();
        assert_eq!(
            event,
            BusEvent::ComponentLoaded(Named {
                name: "x".to_string()
            })
        );
        assert_eq!(event.name(), names::COMPONENT_LOADED);
    }

    #[test]
    fn test_decode_unit_event_without_args() {
        let event: BusEvent = serde_json::from_str(r#"{"event":"allStoresLoaded"}"#).unwrap();
        assert_eq!(event, BusEvent::AllStoresLoaded);
    }

    #[test]
    fn test_decode_optional_timing() {
        let event: BusEvent = serde_json::from_str(
            r#"{"event":"componentRendered","args":{"name":"nav","hrTime":[0,5000000]}}"#,
        )
        .unwrap();
        match event {
            BusEvent::ComponentRendered(args) => {
                assert_eq!(args.hr_time, Some(HrTime(0, 5_000_000)));
                assert_eq!(args.id, None);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        let result = serde_json::from_str::<BusEvent>(r#"{"event":"somethingElse","args":{}}"#);
        assert!(result.is_err());
    }
}
