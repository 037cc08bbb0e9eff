#![forbid(unsafe_code)]

//! The `wasm-bindgen` surface: DOM discovery, listeners, and the observer.
//!
//! Everything here is glue. Events flow DOM → [`NavController`] and the
//! returned [`NavCommand`]s flow back as `scrollIntoView` calls and class
//! toggles; no navigation decision is made on this side of the boundary.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use scrollspy_core::{NavCommand, NavController, PageEvent, PageMap, VisibilityRecord};

use crate::options::SpyOptions;

/// Shared page state reachable from the event closures.
struct PageBinding {
    controller: RefCell<NavController>,
    links: Vec<Element>,
    sections: Vec<Element>,
    /// Section `id` → index in the snapshot, for observer callbacks.
    section_index: HashMap<String, usize>,
    active_class: String,
}

impl PageBinding {
    fn dispatch(&self, event: &PageEvent) {
        let commands = self.controller.borrow_mut().handle(event);
        self.apply(&commands);
    }

    fn apply(&self, commands: &[NavCommand]) {
        for command in commands {
            match *command {
                NavCommand::ScrollTo { section } => self.scroll_to(section),
                NavCommand::MarkActive { link } => self.mark_active(link),
            }
        }
    }

    /// Smooth scroll aligning the section's top edge with the viewport top.
    /// The animation is fire-and-forget, owned by the browser.
    fn scroll_to(&self, section: usize) {
        let Some(el) = self.sections.get(section) else {
            return;
        };
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        opts.set_block(ScrollLogicalPosition::Start);
        el.scroll_into_view_with_scroll_into_view_options(&opts);
    }

    /// Full reset: clear the class from every link, then set it on one.
    fn mark_active(&self, link: usize) {
        for el in &self.links {
            let _ = el.class_list().remove_1(&self.active_class);
        }
        if let Some(el) = self.links.get(link) {
            let _ = el.class_list().add_1(&self.active_class);
        }
    }
}

/// Scroll-spy navigation surface for a browser page.
///
/// ```js
/// const spy = new ScrollSpy();   // or new ScrollSpy(optionsJson)
/// spy.init();
/// // ...
/// spy.destroy();
/// ```
#[wasm_bindgen]
pub struct ScrollSpy {
    options: SpyOptions,
    binding: Option<Rc<PageBinding>>,
    observer: Option<IntersectionObserver>,
    /// Listener closures stay alive until destroy() detaches them.
    listeners: Vec<(Element, Closure<dyn FnMut(Event)>)>,
    observer_callback: Option<Closure<dyn FnMut(Array, IntersectionObserver)>>,
}

#[wasm_bindgen]
impl ScrollSpy {
    /// Create a surface from JSON options; pass nothing for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<String>) -> Result<ScrollSpy, JsValue> {
        let options = match options.as_deref() {
            Some(json) => {
                SpyOptions::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => SpyOptions::default(),
        };
        Ok(Self {
            options,
            binding: None,
            observer: None,
            listeners: Vec::new(),
            observer_callback: None,
        })
    }

    /// Capture the element snapshot and wire both handlers.
    ///
    /// Call once after the document has rendered; the collections are not
    /// re-discovered afterwards. Re-initializing tears the previous wiring
    /// down first.
    pub fn init(&mut self) -> Result<(), JsValue> {
        self.destroy();

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("scrollspy: no document to observe"))?;

        let (page, links, sections) = self.discover(&document)?;
        let mut controller = NavController::new(page, self.options.band());
        controller.set_home_id(&self.options.home_id);

        let section_index = sections
            .iter()
            .enumerate()
            .map(|(index, el)| (el.id(), index))
            .collect();

        let binding = Rc::new(PageBinding {
            controller: RefCell::new(controller),
            links,
            sections,
            section_index,
            active_class: self.options.active_class.clone(),
        });

        // Seed: the first link starts active no matter where the page loaded.
        let seed = binding.controller.borrow_mut().initialize();
        binding.apply(&seed);

        self.attach_click_handlers(&binding)?;
        self.attach_logo_handler(&document, &binding)?;
        self.attach_observer(&binding)?;

        self.binding = Some(binding);
        Ok(())
    }

    /// Index of the currently active link, if any.
    #[wasm_bindgen(js_name = activeLink)]
    pub fn active_link(&self) -> Option<usize> {
        self.binding
            .as_ref()
            .and_then(|b| b.controller.borrow().active_link())
    }

    /// Explicit teardown for JS callers. Detaches listeners, disconnects
    /// the observer, and drops the element snapshot.
    pub fn destroy(&mut self) {
        for (el, closure) in self.listeners.drain(..) {
            let _ = el
                .remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        }
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self.observer_callback = None;
        self.binding = None;
    }

    // -----------------------------------------------------------------------
    // Wiring
    // -----------------------------------------------------------------------

    /// One-time static snapshot of both element collections.
    fn discover(
        &self,
        document: &Document,
    ) -> Result<(PageMap, Vec<Element>, Vec<Element>), JsValue> {
        let mut page = PageMap::new();

        let mut sections = Vec::new();
        let nodes = document.query_selector_all(&self.options.section_selector)?;
        for i in 0..nodes.length() {
            let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            page.push_section(el.id());
            sections.push(el);
        }

        let mut links = Vec::new();
        let nodes = document.query_selector_all(&self.options.nav_link_selector)?;
        for i in 0..nodes.length() {
            let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let scroll_target = el
                .get_attribute(&self.options.link_href_attr)
                .map(|href| href.trim_start_matches('#').to_owned());
            // The match attribute is independent of the scroll destination;
            // links without it fall back to the destination identifier.
            let match_id = el
                .get_attribute(&self.options.link_match_attr)
                .or_else(|| scroll_target.clone());
            page.push_link(scroll_target, match_id);
            links.push(el);
        }

        Ok((page, links, sections))
    }

    fn attach_click_handlers(&mut self, binding: &Rc<PageBinding>) -> Result<(), JsValue> {
        for (index, el) in binding.links.iter().enumerate() {
            let shared = Rc::clone(binding);
            let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                // Replace default jump-to-anchor navigation with the
                // controller's smooth scroll.
                event.prevent_default();
                shared.dispatch(&PageEvent::LinkActivated { link: index });
            });
            el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            self.listeners.push((el.clone(), closure));
        }
        Ok(())
    }

    fn attach_logo_handler(
        &mut self,
        document: &Document,
        binding: &Rc<PageBinding>,
    ) -> Result<(), JsValue> {
        // A page without a logo is fine; nothing to wire.
        let Some(logo) = document.query_selector(&self.options.logo_selector)? else {
            return Ok(());
        };
        let shared = Rc::clone(binding);
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            shared.dispatch(&PageEvent::LogoActivated);
        });
        logo.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        self.listeners.push((logo, closure));
        Ok(())
    }

    fn attach_observer(&mut self, binding: &Rc<PageBinding>) -> Result<(), JsValue> {
        let shared = Rc::clone(binding);
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                let mut records = Vec::new();
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    let id = entry.target().id();
                    let Some(&section) = shared.section_index.get(&id) else {
                        continue;
                    };
                    records.push(VisibilityRecord {
                        section,
                        entered: entry.is_intersecting(),
                        ratio: entry.intersection_ratio() as f32,
                    });
                }
                if !records.is_empty() {
                    shared.dispatch(&PageEvent::Visibility { records });
                }
            },
        );

        let init = IntersectionObserverInit::new();
        // Shrink the observation root to the configured viewport band.
        init.set_root_margin(&self.options.root_margin());
        // Any non-zero overlap with the band counts.
        init.set_threshold(&JsValue::from_f64(0.0));

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        for el in &binding.sections {
            observer.observe(el);
        }

        self.observer = Some(observer);
        self.observer_callback = Some(callback);
        Ok(())
    }
}
