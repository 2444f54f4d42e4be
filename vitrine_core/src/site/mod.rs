// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page controllers.
//!
//! Each submodule drives one piece of the landing page against the
//! [`Host`] capability traits. [`Site::install`] validates a [`SiteConfig`]
//! and wires all of them up in one go; the controllers can also be installed
//! one by one.
//!
//! ```text
//!  Site::install
//!    ├─ MobileMenu          click toggles, link click closes
//!    ├─ ContactForm         submit ─▶ validate ─▶ Submitter ─▶ banner
//!    ├─ enhance_fields      focus / blur / input / change classes
//!    ├─ reveal::install     VisibilityTrigger (re-arming)
//!    ├─ counters::install   VisibilityTrigger (fire once) ─▶ rAF loop
//!    ├─ Navbar              window scroll ─▶ Throttle ─▶ refresh
//!    ├─ loader::install     timers + window load fallback
//!    ├─ NotificationCenter  container in <body>
//!    └─ lazy::install       VisibilityTrigger (fire once) + preloads
//! ```

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::config::{ConfigError, SiteConfig};
use crate::host::{ElementOf, Host};
use crate::throttle::Throttle;
use crate::time::Duration;
use crate::trace::Tracer;

pub mod counters;
pub mod form;
pub mod lazy;
pub mod loader;
pub mod menu;
pub mod modal;
pub mod navbar;
pub mod notify;
pub mod reveal;
pub mod scroll;

#[cfg(test)]
pub(crate) mod testing;

use form::{ContactForm, Submitter};
use loader::LoaderTimings;
use menu::MobileMenu;
use modal::Modal;
use navbar::Navbar;
use notify::{NotificationCenter, NotificationKind};
use scroll::ScrollHelper;

/// Every controller of the landing page, installed on one host.
pub struct Site<H: Host> {
    host: Rc<H>,
    config: SiteConfig,
    menu: Option<Rc<MobileMenu<ElementOf<H>>>>,
    form: Option<Rc<ContactForm<H>>>,
    navbar: Rc<Navbar<H>>,
    scroll_throttle: Throttle<()>,
    notifications: Option<Rc<NotificationCenter<H>>>,
    scroll: ScrollHelper<H>,
    modals: RefCell<Vec<(String, Rc<Modal<ElementOf<H>>>)>>,
}

impl<H: Host> fmt::Debug for Site<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Site")
            .field("config", &self.config)
            .field("menu", &self.menu)
            .field("form", &self.form)
            .field("notifications", &self.notifications)
            .finish_non_exhaustive()
    }
}

impl<H: Host> Site<H> {
    /// Validates `config` and installs every controller.
    ///
    /// Controllers whose elements are missing from the page are skipped.
    pub fn install(
        host: Rc<H>,
        config: SiteConfig,
        submitter: Rc<dyn Submitter<ElementOf<H>>>,
        tracer: Tracer,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let reveal_options = config.reveal_options()?;

        let menu = MobileMenu::install(&host);
        let form = ContactForm::install(&host, submitter, config.form_message());
        let fields = form::enhance_fields(&host);
        let revealed = reveal::install(&host, reveal_options, tracer.clone());
        let counters = counters::install(
            &host,
            config.counter_options(),
            config.counter_duration(),
            tracer.clone(),
        );
        let (navbar, scroll_throttle) = Navbar::install(
            &host,
            config.scroll_throttle(),
            config.navbar_shadow_offset,
            config.active_link_offset,
            tracer.clone(),
        );
        loader::install(
            &host,
            LoaderTimings {
                delay: config.loader_delay(),
                fade: config.loader_fade(),
                fallback: config.loader_fallback(),
            },
        );
        let notifications =
            NotificationCenter::new(&host, config.notification(), config.notification_exit());
        let lazy = lazy::install(&host, config.lazy_options(), tracer);
        let preloaded = lazy::preload(&*host, &config.critical_images);

        tracing::info!(
            fields,
            revealed,
            counters,
            lazy,
            preloaded,
            "site controllers installed"
        );

        Ok(Self {
            scroll: ScrollHelper::new(host.clone(), config.scroll_offset),
            host,
            config,
            menu,
            form,
            navbar,
            scroll_throttle,
            notifications,
            modals: RefCell::new(Vec::new()),
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// The host the site runs on.
    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    /// The mobile menu, if the page has one.
    pub fn menu(&self) -> Option<&Rc<MobileMenu<ElementOf<H>>>> {
        self.menu.as_ref()
    }

    /// The contact form, if the page has one.
    pub fn contact_form(&self) -> Option<&Rc<ContactForm<H>>> {
        self.form.as_ref()
    }

    /// Re-applies navbar styling and the active link immediately, bypassing
    /// the scroll throttle.
    pub fn refresh_navbar(&self) {
        self.navbar.refresh();
    }

    /// Drops a pending throttled navbar refresh.
    pub fn cancel_scroll_refresh(&self) {
        self.scroll_throttle.cancel();
    }

    /// The shared scroll helper.
    pub fn scroller(&self) -> &ScrollHelper<H> {
        &self.scroll
    }

    /// Smooth-scrolls to the section with id `id`, leaving room for the
    /// header. Returns `false` when there is no such section.
    pub fn scroll_to_section(&self, id: &str) -> bool {
        self.scroll.scroll_to_section(id)
    }

    /// Shows a notification. Unknown `kind` names display as info.
    pub fn notify(
        &self,
        message: &str,
        kind: &str,
        duration: Option<Duration>,
    ) -> Option<ElementOf<H>> {
        let center = self.notifications.as_ref()?;
        center.show(message, NotificationKind::from_name(kind), duration)
    }

    /// The modal with element id `id`, bound on first use.
    pub fn modal(&self, id: &str) -> Option<Rc<Modal<ElementOf<H>>>> {
        if let Some((_, modal)) = self.modals.borrow().iter().find(|(k, _)| k == id) {
            return Some(modal.clone());
        }
        let modal = Modal::bind(&self.host, id)?;
        self.modals
            .borrow_mut()
            .push((id.to_string(), modal.clone()));
        Some(modal)
    }

    /// Opens the modal with element id `id`. Returns `false` when there is
    /// no such modal.
    pub fn open_modal(&self, id: &str) -> bool {
        let Some(modal) = self.modal(id) else {
            return false;
        };
        modal.open();
        true
    }

    /// Closes the modal with element id `id`. Returns `false` when there is
    /// no such modal.
    pub fn close_modal(&self, id: &str) -> bool {
        let Some(modal) = self.modal(id) else {
            return false;
        };
        modal.close();
        true
    }
}
