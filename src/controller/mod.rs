// src/controller/mod.rs

//! Public board controller.
//!
//! A single task owns the filter state. State-change events arrive over a
//! queue; every effective change is planned and dispatched as exactly one
//! request. Each dispatch gets a new generation number and aborts the
//! previous in-flight request, and completions from older generations are
//! discarded, so a slow stale response can never overwrite newer state.
//!
//! ```text
//! BoardHandle ──events──▶ controller task ──spawn──▶ request task
//!      ▲                      │     ▲                    │
//!      └──────watch view──────┘     └────completion──────┘
//! ```

pub mod planner;
pub mod view;

use std::sync::Arc;
use std::time::Duration;

use futures::future::{AbortHandle, Abortable};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::error::{AppError, Result};
use crate::models::{BoardItem, Config, DateOrder, Tag};
use crate::services::{BoardQueryService, BoardSearchService};
use crate::session::Session;
use crate::transport::Transport;

pub use planner::{BoardRequest, FilterState, RequestMode, plan};
pub use view::{BoardRow, BoardView, TagClass, format_date, format_date_in};

const EVENT_QUEUE_SIZE: usize = 64;

/// User interaction that may change what the board shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    SetDateOrder(DateOrder),
    /// `None` clears the tag filter
    SetTag(Option<Tag>),
    SetSearchQuery(String),
    /// Form submission; the reactive dispatch already covers it
    Submit,
    /// Re-dispatch the current plan
    Refresh,
}

/// Timing knobs for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Upper bound for a single request
    pub request_timeout: Duration,
    /// Quiet period before a non-empty search edit is dispatched
    pub search_debounce: Duration,
}

impl ControllerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            request_timeout: Duration::from_secs(config.api.timeout_secs),
            search_debounce: Duration::from_millis(config.board.search_debounce_ms),
        }
    }
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// What an event asks the controller to do.
enum Dispatch {
    Now,
    Debounced,
    Nothing,
}

struct Completion {
    generation: u64,
    result: Result<Vec<BoardItem>>,
}

/// Owner of the board state; runs inside its own task.
pub struct BoardController {
    query: BoardQueryService,
    search: BoardSearchService,
    session: Session,
    state: FilterState,
    options: ControllerOptions,
    view: watch::Sender<BoardView>,
    generation: u64,
    in_flight: Option<AbortHandle>,
}

impl BoardController {
    /// Spawn the controller and perform the initial load.
    pub fn spawn(
        transport: Arc<dyn Transport>,
        session: Session,
        state: FilterState,
        options: ControllerOptions,
    ) -> BoardHandle {
        let (view_tx, view_rx) = watch::channel(BoardView::default());
        let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_SIZE);

        let controller = Self {
            query: BoardQueryService::new(Arc::clone(&transport)),
            search: BoardSearchService::new(transport),
            session,
            state,
            options,
            view: view_tx,
            generation: 0,
            in_flight: None,
        };
        let task = tokio::spawn(controller.run(event_rx));

        BoardHandle {
            events: event_tx,
            view: view_rx,
            task,
        }
    }

    async fn run(mut self, mut events: mpsc::Receiver<BoardEvent>) {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();
        let mut debounce_until: Option<Instant> = None;

        self.dispatch(&done_tx);

        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    match self.apply(event) {
                        Dispatch::Now => {
                            debounce_until = None;
                            self.dispatch(&done_tx);
                        }
                        Dispatch::Debounced => {
                            debounce_until = Some(Instant::now() + self.options.search_debounce);
                        }
                        Dispatch::Nothing => {}
                    }
                }
                Some(done) = done_rx.recv() => self.complete(done),
                _ = tokio::time::sleep_until(debounce_until.unwrap_or_else(Instant::now)),
                    if debounce_until.is_some() =>
                {
                    debounce_until = None;
                    self.dispatch(&done_tx);
                }
            }
        }

        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        log::debug!("Board controller stopped");
    }

    /// Fold an event into the state.
    fn apply(&mut self, event: BoardEvent) -> Dispatch {
        match event {
            BoardEvent::SetDateOrder(order) if order != self.state.date_order => {
                self.state.date_order = order;
                Dispatch::Now
            }
            BoardEvent::SetTag(tag) if tag != self.state.tag => {
                self.state.tag = tag;
                Dispatch::Now
            }
            BoardEvent::SetSearchQuery(query) if query != self.state.search_query => {
                self.state.search_query = query;
                if self.state.search_text().is_some() && !self.options.search_debounce.is_zero() {
                    Dispatch::Debounced
                } else {
                    Dispatch::Now
                }
            }
            BoardEvent::Refresh => Dispatch::Now,
            BoardEvent::SetDateOrder(_)
            | BoardEvent::SetTag(_)
            | BoardEvent::SetSearchQuery(_)
            | BoardEvent::Submit => Dispatch::Nothing,
        }
    }

    fn dispatch(&mut self, done_tx: &mpsc::UnboundedSender<Completion>) {
        self.generation += 1;
        let generation = self.generation;

        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }

        let request = match plan(&self.state, &self.session) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("Board request {} not sent: {}", generation, e);
                self.view.send_modify(|view| {
                    view.items.clear();
                    view.error = Some(e.to_string());
                    view.loading = false;
                    view.generation = generation;
                    view.mode = None;
                });
                return;
            }
        };

        log::debug!("Dispatching board request {}: {:?}", generation, request);
        let mode = request.mode();
        self.view.send_modify(|view| {
            view.loading = true;
            view.error = None;
            view.generation = generation;
            view.mode = Some(mode);
        });

        let (handle, registration) = AbortHandle::new_pair();
        let work = Self::execute(
            self.query.clone(),
            self.search.clone(),
            self.session.clone(),
            request,
            self.options.request_timeout,
        );
        let done_tx = done_tx.clone();
        tokio::spawn(async move {
            if let Ok(result) = Abortable::new(work, registration).await {
                let _ = done_tx.send(Completion { generation, result });
            }
        });
        self.in_flight = Some(handle);
    }

    async fn execute(
        query: BoardQueryService,
        search: BoardSearchService,
        session: Session,
        request: BoardRequest,
        timeout: Duration,
    ) -> Result<Vec<BoardItem>> {
        let call = async {
            match &request {
                BoardRequest::Filter(filter) => query.fetch_board(&session, filter).await,
                BoardRequest::Search(text) => search.search_board(&session, text).await,
            }
        };
        tokio::time::timeout(timeout, call)
            .await
            .map_err(|_| AppError::Timeout(timeout))?
    }

    fn complete(&mut self, done: Completion) {
        if done.generation != self.generation {
            log::debug!(
                "Dropping stale board response {} (current {})",
                done.generation,
                self.generation
            );
            return;
        }
        self.in_flight = None;

        self.view.send_modify(|view| {
            view.loading = false;
            match done.result {
                Ok(items) => {
                    log::info!("Board shows {} items", items.len());
                    view.items = items;
                    view.error = None;
                }
                Err(e) => {
                    log::warn!("Board request {} failed: {}", done.generation, e);
                    view.items.clear();
                    view.error = Some(e.to_string());
                }
            }
        });
    }
}

/// Caller side of a running board controller.
pub struct BoardHandle {
    events: mpsc::Sender<BoardEvent>,
    view: watch::Receiver<BoardView>,
    task: JoinHandle<()>,
}

impl BoardHandle {
    /// Queue an event. Returns `false` if the controller has stopped.
    pub async fn send(&self, event: BoardEvent) -> bool {
        self.events.send(event).await.is_ok()
    }

    /// Current view snapshot.
    pub fn view(&self) -> BoardView {
        self.view.borrow().clone()
    }

    /// Independent receiver for view updates.
    pub fn subscribe(&self) -> watch::Receiver<BoardView> {
        self.view.clone()
    }

    /// Wait until the view satisfies `predicate`.
    pub async fn wait_for(&mut self, predicate: impl FnMut(&BoardView) -> bool) -> BoardView {
        if let Ok(view) = self.view.wait_for(predicate).await {
            return (*view).clone();
        }
        self.view.borrow().clone()
    }

    /// Wait for the request of `generation` to settle.
    pub async fn settled(&mut self, generation: u64) -> BoardView {
        self.wait_for(|v| v.generation >= generation && !v.loading)
            .await
    }

    /// Stop the controller, aborting any in-flight request.
    pub async fn shutdown(self) {
        let Self { events, task, .. } = self;
        drop(events);
        if let Err(e) = task.await {
            log::warn!("Board controller task ended abnormally: {}", e);
        }
    }
}
