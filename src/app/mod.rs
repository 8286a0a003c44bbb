use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use crate::layout::star_layout;
use crate::profile::{
    GraphData, IdentityMap, ProfileRecord, RecordSession, StoreConfig, extract, fetch_records,
    graph_from_identity,
};

mod graph_view;
mod json_tree;
mod panels;
mod render_utils;
mod strength_map;

type LoadResult = Result<Vec<ProfileRecord>, String>;

pub struct SelfMapApp {
    config: StoreConfig,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    session: RecordSession,
    identity: IdentityMap,
    graph_data: GraphData,
    node_positions: Vec<Vec2>,
    search: String,
    selected: Option<String>,
    pan: Vec2,
    zoom: f32,
}

impl SelfMapApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: StoreConfig) -> Self {
        let state = Self::start_load(config.clone());
        Self {
            config,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(config: StoreConfig) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = fetch_records(&config).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(config: StoreConfig) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(config),
        }
    }
}

impl eframe::App for SelfMapApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(records) => AppState::Ready(Box::new(ViewModel::new(records))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading identity profiles...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load identity profiles");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.config.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.config.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(records) => AppState::Ready(Box::new(ViewModel::new(records))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(AppState::Error("Background fetch worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}

impl ViewModel {
    fn new(records: Vec<ProfileRecord>) -> Self {
        let mut model = Self {
            session: RecordSession::new(records),
            identity: IdentityMap::default(),
            graph_data: GraphData::default(),
            node_positions: Vec::new(),
            search: String::new(),
            selected: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
        };
        model.refresh_derived();
        model
    }

    /// Recomputes the identity map, graph data, and layout for the record
    /// under the cursor. Called after every cursor move or reload; derived
    /// structures are never cached across records.
    fn refresh_derived(&mut self) {
        match self.session.current() {
            Some(record) => {
                self.identity = extract(&record.json_content);
                self.graph_data = graph_from_identity(&self.identity);
            }
            None => {
                self.identity = IdentityMap::default();
                self.graph_data = GraphData::default();
            }
        }

        let node_ids = self
            .graph_data
            .nodes
            .iter()
            .map(|node| node.id.clone())
            .collect::<Vec<_>>();
        let index_by_id = node_ids
            .iter()
            .enumerate()
            .map(|(index, id)| (id.as_str(), index))
            .collect::<HashMap<_, _>>();
        let links = self
            .graph_data
            .links
            .iter()
            .filter_map(|link| {
                let from = *index_by_id.get(link.source.as_str())?;
                let to = *index_by_id.get(link.target.as_str())?;
                Some((from, to, link.value as f32))
            })
            .collect::<Vec<_>>();
        self.node_positions = star_layout(&node_ids, &links);

        if let Some(label) = &self.selected
            && self.identity.get(label).is_none()
        {
            self.selected = None;
        }
    }
}
