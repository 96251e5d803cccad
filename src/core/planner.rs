// buslog - core/planner.rs
//
// Decides, from one configured level, which bus events the logger listens to
// and how each one is turned into a message. Tiers are walked from the most
// severe down; a tier is included only while the configured level does not
// exceed its threshold, so the result is cumulative.
//
// Core layer: pure data, no bus or I/O access. Attaching the plan to a bus is
// done by `app::logger`.

use crate::core::duration::pretty;
use crate::core::event::{names, BusEvent};
use crate::core::level::Level;
use crate::core::message::LogMessage;
use crate::core::settings::Environment;
use crate::util::constants;

/// Turns an event payload into a message. `None` when the payload does not
/// belong to the binding's event.
pub type RenderFn = fn(&BusEvent) -> Option<LogMessage>;

/// One event name bound to the level it is written at.
#[derive(Clone, Copy)]
pub struct Binding {
    pub event: &'static str,
    pub level: Level,
    pub render: RenderFn,
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("event", &self.event)
            .field("level", &self.level)
            .finish()
    }
}

/// All bindings that become active once the configured level reaches
/// `threshold`.
#[derive(Debug, Clone)]
pub struct Tier {
    pub threshold: Level,
    pub bindings: Vec<Binding>,
}

impl Tier {
    fn new(threshold: Level, events: &[(&'static str, RenderFn)]) -> Self {
        Self {
            threshold,
            bindings: events
                .iter()
                .map(|&(event, render)| Binding {
                    event,
                    level: threshold,
                    render,
                })
                .collect(),
        }
    }
}

/// Tiers for an environment, most severe first.
pub fn tiers(environment: Environment) -> Vec<Tier> {
    let mut info = vec![
        on(names::INFO, render_info),
        on(names::COMPONENT_LOADED, render_component_loaded),
        on(names::STORE_LOADED, render_store_loaded),
        on(names::ALL_STORES_LOADED, render_all_stores_loaded),
        on(names::ALL_COMPONENTS_LOADED, render_all_components_loaded),
    ];
    let mut debug = vec![
        on(names::DEBUG, render_debug),
        on(names::COMPONENT_RENDER, render_component_render),
        on(names::COMPONENT_RENDERED, render_component_rendered),
        on(names::DOCUMENT_RENDERED, render_document_rendered),
    ];

    match environment {
        Environment::Server => info.extend([
            on(names::STORE_FOUND, render_store_found),
            on(names::COMPONENT_FOUND, render_component_found),
            on(names::APP_DEFINITIONS_BUILT, render_definitions_built),
            on(names::APP_BUNDLE_BUILT, render_app_bundle_built),
            on(names::EXTERNALS_BUNDLE_BUILT, render_externals_bundle_built),
            on(names::APP_BUNDLE_CHANGED, render_app_bundle_changed),
        ]),
        Environment::Browser => debug.extend([
            on(names::DOCUMENT_UPDATED, render_document_updated),
            on(names::COMPONENT_BOUND, render_component_bound),
            on(names::COMPONENT_UNBOUND, render_component_unbound),
        ]),
    }

    vec![
        Tier::new(Level::ERROR, &[on(names::ERROR, render_error)]),
        Tier::new(Level::WARN, &[on(names::WARN, render_warn)]),
        Tier::new(Level::INFO, &info),
        Tier::new(Level::DEBUG, &debug),
        Tier::new(Level::TRACE, &[on(names::TRACE, render_trace)]),
    ]
}

fn on(event: &'static str, render: RenderFn) -> (&'static str, RenderFn) {
    (event, render)
}

/// Bindings to attach for a configured level, in subscription order.
pub fn plan(configured: Level, environment: Environment) -> Vec<Binding> {
    let mut bindings = Vec::new();
    for tier in tiers(environment) {
        if configured > tier.threshold {
            break;
        }
        bindings.extend(tier.bindings);
    }
    bindings
}

// =============================================================================
// Name rendering
// =============================================================================

/// `#<id>` for a present, non-empty element id, otherwise empty.
pub fn element_id(id: Option<&str>) -> String {
    match id {
        Some(id) if !id.is_empty() => format!("#{id}"),
        _ => String::new(),
    }
}

/// Tag name a component renders under.
pub fn tag_name_for_component(name: Option<&str>) -> String {
    let Some(name) = name else {
        return String::new();
    };
    let upper = name.to_uppercase();
    if upper == constants::HEAD_COMPONENT_NAME {
        upper
    } else if upper == constants::DOCUMENT_COMPONENT_NAME {
        constants::DOCUMENT_TAG_NAME.to_string()
    } else {
        format!("{}{upper}", constants::COMPONENT_TAG_PREFIX)
    }
}

// =============================================================================
// Render functions
// =============================================================================

fn render_error(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::Error(message) => Some(message.clone()),
        _ => None,
    }
}

fn render_warn(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::Warn(message) => Some(message.clone()),
        _ => None,
    }
}

fn render_info(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::Info(message) => Some(message.clone()),
        _ => None,
    }
}

fn render_debug(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::Debug(message) => Some(message.clone()),
        _ => None,
    }
}

fn render_trace(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::Trace(message) => Some(message.clone()),
        _ => None,
    }
}

fn render_component_loaded(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::ComponentLoaded(args) => Some(format!("Component \"{}\" loaded", args.name).into()),
        _ => None,
    }
}

fn render_store_loaded(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::StoreLoaded(args) => Some(format!("Store \"{}\" loaded", args.name).into()),
        _ => None,
    }
}

fn render_all_stores_loaded(event: &BusEvent) -> Option<LogMessage> {
    matches!(event, BusEvent::AllStoresLoaded).then(|| "All stores loaded".into())
}

fn render_all_components_loaded(event: &BusEvent) -> Option<LogMessage> {
    matches!(event, BusEvent::AllComponentsLoaded).then(|| "All components loaded".into())
}

fn render_component_render(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::ComponentRender(args) => Some(
            format!(
                "Component \"{}{}\" is being rendered...",
                tag_name_for_component(args.name.as_deref()),
                element_id(args.id.as_deref())
            )
            .into(),
        ),
        _ => None,
    }
}

fn render_component_rendered(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::ComponentRendered(args) => {
            let time = args
                .hr_time
                .map(|hr| format!(" ({})", pretty(hr)))
                .unwrap_or_default();
            Some(
                format!(
                    "Component \"{}{}\" rendered{time}",
                    tag_name_for_component(args.name.as_deref()),
                    element_id(args.id.as_deref())
                )
                .into(),
            )
        }
        _ => None,
    }
}

fn render_document_rendered(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::DocumentRendered(args) => {
            Some(format!("Document rendered for URI {}", args.location).into())
        }
        _ => None,
    }
}

fn render_store_found(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::StoreFound(args) => {
            Some(format!("Store \"{}\" found at {}", args.name, args.path).into())
        }
        _ => None,
    }
}

fn render_component_found(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::ComponentFound(args) => {
            Some(format!("Component \"{}\" found at {}", args.name, args.path).into())
        }
        _ => None,
    }
}

fn render_definitions_built(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::AppDefinitionsBuilt(args) => Some(
            format!("App definitions have been built ({})", pretty(args.hr_time)).into(),
        ),
        _ => None,
    }
}

fn render_app_bundle_built(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::AppBundleBuilt(args) => Some(
            format!(
                "Browser app bundle has been built at {} ({})",
                args.path,
                pretty(args.hr_time)
            )
            .into(),
        ),
        _ => None,
    }
}

fn render_externals_bundle_built(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::ExternalsBundleBuilt(args) => Some(
            format!(
                "Browser externals bundle has been built at {} ({})",
                args.path,
                pretty(args.hr_time)
            )
            .into(),
        ),
        _ => None,
    }
}

fn render_app_bundle_changed(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::AppBundleChanged(args) => Some(
            format!(
                "App bundle has been updated, changed files: [{}]",
                args.changed_files.join(",")
            )
            .into(),
        ),
        _ => None,
    }
}

fn render_document_updated(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::DocumentUpdated(stores) => {
            Some(format!("Document updated ({} store(s) changed)", stores.len()).into())
        }
        _ => None,
    }
}

fn render_component_bound(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::ComponentBound(element) => Some(
            format!(
                "Component \"{}{}\" is bound",
                element.tag_name,
                element_id(element.id.as_deref())
            )
            .into(),
        ),
        _ => None,
    }
}

fn render_component_unbound(event: &BusEvent) -> Option<LogMessage> {
    match event {
        BusEvent::ComponentUnbound(element) => Some(
            format!(
                "Component \"{}{}\" is unbound",
                element.tag_name,
                element_id(element.id.as_deref())
            )
            .into(),
        ),
        _ => None,
    }
}
