//! Main egui application — owns the store wiring and composes the panels.

use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use chat_core::bus::{ChatBus, Subscription};
use chat_core::ports::{ChatApi, StoragePort};
use chat_core::store::{ChatStore, SharedStore};
use chat_platform::http::HttpChatClient;
use chat_platform::storage::auto_detect_storage;
use chat_types::config::{ClientConfig, StorageConfig};
use chat_ui::panels::chat::{chat_panel, ChatAction};
use chat_ui::panels::settings::{settings_panel, SaveFeedback, SettingsAction};
use chat_ui::state::UiState;
use chat_ui::theme;

const CONFIG_STORAGE_KEY: &str = "chat:config";

/// The main application state
pub struct ChatApp {
    config: ClientConfig,
    store: SharedStore,
    api: Rc<dyn ChatApi>,
    storage: Rc<dyn StoragePort>,
    events: Subscription,
    ui_state: UiState,
    save_feedback: Option<SaveFeedback>,
    first_frame: bool,
}

impl ChatApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        // The config itself lives in storage, so bootstrap with the default
        // backend preference, then honour whatever the saved config asks for.
        let boot_storage = auto_detect_storage(&StorageConfig::default());
        let config = Self::restore_config(boot_storage.as_ref());
        let storage = auto_detect_storage(&config.storage);

        let bus = ChatBus::new();
        let events = bus.subscribe();
        let store = ChatStore::new_shared(bus, storage.clone());
        store.borrow_mut().hydrate();

        let api: Rc<dyn ChatApi> = Rc::new(HttpChatClient::from_config(&config));

        Self {
            config,
            store,
            api,
            storage,
            events,
            ui_state: UiState::new(),
            save_feedback: None,
            first_frame: true,
        }
    }

    fn restore_config(storage: &dyn StoragePort) -> ClientConfig {
        let raw = match storage.get(CONFIG_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ClientConfig::default(),
            Err(e) => {
                log::warn!("config slot unreadable: {}", e);
                return ClientConfig::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(config) => {
                log::info!("config restored from storage");
                config
            }
            Err(e) => {
                log::warn!("discarding unreadable config: {}", e);
                ClientConfig::default()
            }
        }
    }

    fn save_config(&mut self) {
        let feedback = match serde_json::to_string(&self.config)
            .map_err(chat_types::ChatError::from)
            .and_then(|json| self.storage.set(CONFIG_STORAGE_KEY, &json))
        {
            Ok(()) => {
                log::info!("config saved to storage");
                SaveFeedback { message: "Saved".to_string(), success: true }
            }
            Err(e) => {
                log::warn!("failed to save config: {}", e);
                SaveFeedback { message: format!("Save failed: {}", e), success: false }
            }
        };
        self.save_feedback = Some(feedback);
        self.rebuild_api();
    }

    fn rebuild_api(&mut self) {
        self.api = Rc::new(HttpChatClient::from_config(&self.config));
    }

    /// Dispatch one send lifecycle to the store (async)
    fn dispatch_send(&self, text: String, ctx: &egui::Context) {
        let store = self.store.clone();
        let api = self.api.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            // A failed send already surfaced through the store's error
            // field; nothing further to do here.
            let _ = ChatStore::send_message(&store, api.as_ref(), &text).await;
            ctx.request_repaint();
        });
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Drain store notifications accumulated since the last frame
        let events = self.events.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        if self.store.borrow().state().is_loading {
            ctx.request_repaint();
        }

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Webchat")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                ui.label(
                    RichText::new(format!("Endpoint: {}", self.config.base_url))
                        .color(theme::TEXT_SECONDARY)
                        .small(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.ui_state.show_settings, "Settings")
                        .clicked()
                    {
                        self.ui_state.show_settings = !self.ui_state.show_settings;
                    }
                });
            });
        });

        // ── Settings side panel ──────────────────────────────
        if self.ui_state.show_settings {
            SidePanel::right("settings_panel")
                .min_width(280.0)
                .max_width(350.0)
                .show(ctx, |ui| {
                    match settings_panel(ui, &mut self.config, self.save_feedback.as_ref()) {
                        SettingsAction::SaveClicked => self.save_config(),
                        SettingsAction::Changed => self.save_feedback = None,
                        SettingsAction::None => {}
                    }
                });
        }

        // ── Conversation ─────────────────────────────────────
        let action = CentralPanel::default()
            .show(ctx, |ui| {
                let store = self.store.borrow();
                chat_panel(ui, store.state(), &mut self.ui_state)
            })
            .inner;

        match action {
            Some(ChatAction::Send(text)) => self.dispatch_send(text, ctx),
            Some(ChatAction::ClearHistory) => self.store.borrow_mut().clear_messages(),
            None => {}
        }
    }
}
