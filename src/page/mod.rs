//! Browser page: DOM view, event wiring and the exported entry points.
//!
//! The mounted page lives in a `thread_local!` cell so timer and click
//! callbacks can reach it. Every callback goes through [`dispatch`], which
//! feeds the event to the [`Greeting`] and applies the resulting [`Update`]
//! to the DOM.

mod art;
mod scheduler;
mod style;

pub use art::{PALETTES, Stop};
pub use scheduler::BrowserScheduler;

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent, window};

use crate::bloom::{DecorativeElement, Event, Greeting, Stage, Update};
use crate::config::GreetingConfig;
use crate::error::PageError;
use crate::rng::Prng;
use crate::timer::{Timer, TimerId};

// --- DOM view ---------------------------------------------------------------

/// Handles to the nodes the state machine redraws.
struct View {
    doc: Document,
    root: Element,
    center: Element,
    icon: Element,
    prompt: Element,
    seed_slot: Element,
    bloom: Element,
    field: Element,
    message: Element,
    reset: Element,
}

fn el(doc: &Document, tag: &str, class: &str) -> Result<Element, PageError> {
    let node = doc.create_element(tag)?;
    if !class.is_empty() {
        node.set_class_name(class);
    }
    Ok(node)
}

fn show(node: &Element, visible: bool) -> Result<(), PageError> {
    let style = if visible { "" } else { "display:none" };
    node.set_attribute("style", style)?;
    Ok(())
}

impl View {
    fn build(doc: &Document, config: &GreetingConfig) -> Result<Self, PageError> {
        let root = el(doc, "main", "ib-root")?;
        root.set_id("iris-bloom");
        root.set_attribute("style", style::ROOT_STYLE)?;

        let sheet = el(doc, "style", "")?;
        sheet.set_id(style::STYLE_ID);
        sheet.set_text_content(Some(style::STYLESHEET));
        root.append_child(&sheet)?;

        let defs = el(doc, "div", "")?;
        defs.set_inner_html(&art::defs_svg());
        root.append_child(&defs)?;

        let center = el(doc, "div", "ib-center")?;
        center.set_id("iris-bloom-center");
        let icon = el(doc, "div", "iris-breathe")?;
        icon.set_inner_html(&art::iris_head("ib-icon"));
        let seed_slot = el(doc, "div", "")?;
        let prompt = el(doc, "p", "ib-prompt")?;
        prompt.set_text_content(Some(&config.prompt));
        center.append_child(&icon)?;
        center.append_child(&seed_slot)?;
        center.append_child(&prompt)?;
        root.append_child(&center)?;

        let bloom = el(doc, "div", "ib-bloom")?;
        let field = el(doc, "div", "")?;
        let wrap = el(doc, "div", "ib-message-wrap")?;
        let message = el(doc, "h1", "ib-message")?;
        wrap.append_child(&message)?;
        let reset = el(doc, "button", "ib-reset")?;
        reset.set_text_content(Some(&config.reset_label));
        bloom.append_child(&field)?;
        bloom.append_child(&wrap)?;
        bloom.append_child(&reset)?;
        root.append_child(&bloom)?;

        let view = Self {
            doc: doc.clone(),
            root,
            center,
            icon,
            prompt,
            seed_slot,
            bloom,
            field,
            message,
            reset,
        };
        view.stage(Stage::Idle)?;
        Ok(view)
    }

    fn apply(&self, update: &Update) -> Result<(), PageError> {
        match update {
            Update::Stage(stage) => self.stage(*stage),
            Update::ElementAdded(flower) => self.plant(flower),
            Update::TextRevealed(text) => {
                self.message.set_text_content(Some(text));
                Ok(())
            }
        }
    }

    fn stage(&self, stage: Stage) -> Result<(), PageError> {
        self.root.set_attribute("data-stage", stage.as_str())?;
        let idle = stage == Stage::Idle;
        show(&self.icon, idle)?;
        show(&self.prompt, idle)?;
        match stage {
            Stage::SeedDrop => {
                // Fresh node so the drop animation restarts on every click.
                self.seed_slot
                    .set_inner_html(&format!("<div class=\"seed-drop\">{}</div>", art::seed()));
            }
            _ => self.seed_slot.set_inner_html(""),
        }
        let bloomed = stage == Stage::Bloom;
        let center_class = if bloomed { "ib-center ib-hidden" } else { "ib-center" };
        self.center.set_class_name(center_class);
        show(&self.bloom, bloomed)?;
        show(&self.reset, bloomed)?;
        self.field.set_inner_html("");
        self.message.set_text_content(None);
        Ok(())
    }

    fn plant(&self, flower: &DecorativeElement) -> Result<(), PageError> {
        let node = el(&self.doc, "div", "ib-flower")?;
        node.set_attribute("data-id", &flower.id.to_string())?;
        node.set_attribute("style", &flower.style())?;
        node.set_inner_html(&art::iris_with_stem());
        self.field.append_child(&node)?;
        Ok(())
    }
}

/// A click listener removed from its target when dropped.
struct Listener {
    target: Element,
    kind: &'static str,
    callback: Closure<dyn FnMut(MouseEvent)>,
}

impl Listener {
    fn attach(target: &Element, kind: &'static str, event: Event) -> Result<Self, PageError> {
        let callback = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            dispatch(event);
        }) as Box<dyn FnMut(_)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

// --- Mounted page -----------------------------------------------------------

struct Page {
    greeting: Greeting,
    scheduler: BrowserScheduler,
    rng: Prng,
    view: View,
    _listeners: Vec<Listener>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

fn on_timer(id: TimerId, timer: Timer) {
    dispatch(Event::Timer(id, timer));
}

/// Feed one event to the mounted greeting and redraw.
fn dispatch(event: Event) {
    PAGE.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            log::warn!("re-entrant dispatch of {event:?} dropped");
            return;
        };
        let Some(page) = slot.as_mut() else {
            return;
        };
        page.scheduler.collect_retired();
        if let Event::Timer(id, _) = event {
            page.scheduler.settle(id);
        }
        let update = page
            .greeting
            .handle(event, &mut page.scheduler, &mut page.rng);
        if let Some(update) = update {
            if let Err(err) = page.view.apply(&update) {
                log::warn!("redraw failed: {err}");
            }
        }
    });
}

fn mount(config: GreetingConfig) -> Result<(), PageError> {
    config.validate()?;
    unmount();
    let win = window().ok_or(PageError::NoWindow)?;
    let doc = win.document().ok_or(PageError::NoDocument)?;
    let body = doc.body().ok_or(PageError::NoBody)?;

    let view = View::build(&doc, &config)?;
    let listeners = vec![
        Listener::attach(&view.center, "click", Event::Trigger)?,
        Listener::attach(&view.reset, "click", Event::Reset)?,
    ];
    body.append_child(&view.root)?;

    let page = Page {
        greeting: Greeting::new(config),
        scheduler: BrowserScheduler::new(win, on_timer),
        rng: Prng::from_entropy(),
        view,
        _listeners: listeners,
    };
    PAGE.with(|cell| cell.replace(Some(page)));
    log::info!("greeting mounted");
    Ok(())
}

fn unmount() -> bool {
    let Some(mut page) = PAGE.with(|cell| cell.borrow_mut().take()) else {
        return false;
    };
    page.greeting.teardown(&mut page.scheduler);
    let leaked = page.scheduler.armed_count();
    if leaked > 0 {
        log::warn!("{leaked} timers still armed at unmount");
    }
    page.view.root.remove();
    log::info!("greeting unmounted");
    true
}

fn with_page<T>(f: impl FnOnce(&mut Page) -> Result<T, PageError>) -> Result<T, PageError> {
    PAGE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let page = slot.as_mut().ok_or(PageError::NotMounted)?;
        f(page)
    })
}

// --- WASM entry points ------------------------------------------------------

/// Mount the greeting into `document.body` with the default timing and copy.
#[wasm_bindgen]
pub fn start_greeting() -> Result<(), JsValue> {
    mount(GreetingConfig::default())?;
    Ok(())
}

/// Mount with a JSON config; omitted fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_greeting_with_config(json: &str) -> Result<(), JsValue> {
    let config = GreetingConfig::from_json(json)?;
    mount(config)?;
    Ok(())
}

/// Swap the bloom message. A reveal in progress restarts from empty.
#[wasm_bindgen]
pub fn set_greeting_message(text: &str) -> Result<(), JsValue> {
    with_page(|page| {
        page.scheduler.collect_retired();
        page.greeting.set_message(text, &mut page.scheduler);
        if page.greeting.stage() == Stage::Bloom {
            page.view
                .message
                .set_text_content(Some(page.greeting.revealed()));
        }
        Ok(())
    })?;
    Ok(())
}

/// Current stage name: "idle", "seedDrop" or "bloom".
#[wasm_bindgen]
pub fn greeting_stage() -> Result<String, JsValue> {
    Ok(with_page(|page| Ok(page.greeting.stage().as_str().to_string()))?)
}

/// Browser timers currently armed for the mounted page, 0 when unmounted.
#[wasm_bindgen]
pub fn greeting_armed_timers() -> usize {
    PAGE.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(0, |page| page.scheduler.armed_count())
    })
}

/// Cancel every pending timer and remove the page. Returns false if nothing was mounted.
#[wasm_bindgen]
pub fn stop_greeting() -> bool {
    unmount()
}
