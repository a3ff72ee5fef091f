use actix_web::rt;
use actix_web::rt::task::JoinHandle;
use actix_web::rt::time::{interval, sleep};
use rotina_domain::{ActiveReminder, ReminderSession, Toast, ID, TOAST_DURATION_MILLIS};
use rotina_infra::Context;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

/// How often a mounted planning view re-scans its events
pub const REMINDER_TICK_INTERVAL: Duration = Duration::from_secs(60);

struct SessionState {
    reminders: ReminderSession,
    /// Toasts currently on display. Entries leave either through their own
    /// expiry timer or through a dismiss/snooze.
    toasts: Vec<Toast>,
}

/// One mounted planning view. The session exclusively owns its reminder
/// state and every timer it spawned; dropping the session aborts the tick
/// and all pending toast expiries, so nothing can mutate state after
/// teardown.
pub struct PlanningSession {
    user_id: ID,
    state: Arc<Mutex<SessionState>>,
    toast_timers: Arc<Mutex<HashMap<ID, JoinHandle<()>>>>,
    tick: JoinHandle<()>,
}

impl PlanningSession {
    pub fn start(user_id: ID, ctx: Context) -> Self {
        let state = Arc::new(Mutex::new(SessionState {
            reminders: ReminderSession::new(),
            toasts: Vec::new(),
        }));
        let toast_timers: Arc<Mutex<HashMap<ID, JoinHandle<()>>>> =
            Arc::new(Mutex::new(HashMap::new()));

        let tick = rt::spawn({
            let user_id = user_id.clone();
            let state = state.clone();
            let toast_timers = toast_timers.clone();
            async move {
                // The first tick fires immediately, so a freshly mounted
                // view gets its scan without waiting a full interval
                let mut tick_interval = interval(REMINDER_TICK_INTERVAL);
                loop {
                    tick_interval.tick().await;
                    run_check(&user_id, &ctx, &state, &toast_timers).await;
                }
            }
        });

        Self {
            user_id,
            state,
            toast_timers,
            tick,
        }
    }

    pub fn reminders(&self) -> (Vec<ActiveReminder>, Vec<Toast>) {
        let state = self.state.lock().unwrap();
        (state.reminders.active().to_vec(), state.toasts.clone())
    }

    pub fn dismiss(&self, event_id: &ID) {
        let mut state = self.state.lock().unwrap();
        state.reminders.dismiss(event_id);
        state.toasts.retain(|toast| &toast.event_id != event_id);
    }

    pub fn snooze(&self, event_id: &ID, now: i64) {
        let mut state = self.state.lock().unwrap();
        state.reminders.snooze(event_id, now);
        state.toasts.retain(|toast| &toast.event_id != event_id);
    }
}

impl Drop for PlanningSession {
    fn drop(&mut self) {
        self.tick.abort();
        for timer in self.toast_timers.lock().unwrap().values() {
            timer.abort();
        }
    }
}

async fn run_check(
    user_id: &ID,
    ctx: &Context,
    state: &Arc<Mutex<SessionState>>,
    toast_timers: &Arc<Mutex<HashMap<ID, JoinHandle<()>>>>,
) {
    let events = match ctx.repos.events.find_by_user(user_id).await {
        Ok(events) => events,
        Err(e) => {
            warn!("Reminder check could not fetch events: {:?}", e);
            return;
        }
    };
    let now = ctx.sys.get_timestamp_millis();

    let new_toasts = {
        let mut state = state.lock().unwrap();
        let toasts = state.reminders.check(&events, now);
        state.toasts.extend(toasts.iter().cloned());
        toasts
    };

    // Each toast expires on its own one-shot timer, independent of any
    // later scan
    for toast in new_toasts {
        let state = state.clone();
        let event_id = toast.event_id.clone();
        let timer = rt::spawn(async move {
            sleep(Duration::from_millis(TOAST_DURATION_MILLIS as u64)).await;
            let mut state = state.lock().unwrap();
            state.toasts.retain(|t| t.event_id != event_id);
        });
        toast_timers
            .lock()
            .unwrap()
            .insert(toast.event_id, timer);
    }
}

/// Registry of mounted planning views, keyed by session id
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<ID, PlanningSession>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn start_session(&self, user_id: ID, ctx: Context) -> ID {
        let session_id = ID::new();
        let session = PlanningSession::start(user_id, ctx);
        self.sessions
            .lock()
            .unwrap()
            .insert(session_id.clone(), session);
        session_id
    }

    /// Removes the session; dropping it cancels the tick and every pending
    /// toast timer.
    pub fn stop_session(&self, session_id: &ID) -> bool {
        self.sessions.lock().unwrap().remove(session_id).is_some()
    }

    pub fn reminders(&self, session_id: &ID) -> Option<(Vec<ActiveReminder>, Vec<Toast>)> {
        let sessions = self.sessions.lock().unwrap();
        sessions.get(session_id).map(|session| session.reminders())
    }

    pub fn dismiss(&self, session_id: &ID, event_id: &ID) -> bool {
        let sessions = self.sessions.lock().unwrap();
        match sessions.get(session_id) {
            Some(session) => {
                session.dismiss(event_id);
                true
            }
            None => false,
        }
    }

    pub fn snooze(&self, session_id: &ID, event_id: &ID, now: i64) -> bool {
        let sessions = self.sessions.lock().unwrap();
        match sessions.get(session_id) {
            Some(session) => {
                session.snooze(event_id, now);
                true
            }
            None => false,
        }
    }

    /// Out-of-band re-check of one session
    pub async fn refresh(&self, session_id: &ID, ctx: &Context) -> bool {
        let session = {
            let sessions = self.sessions.lock().unwrap();
            sessions.get(session_id).map(|session| {
                (
                    session.user_id.clone(),
                    session.state.clone(),
                    session.toast_timers.clone(),
                )
            })
        };
        match session {
            Some((user_id, state, toast_timers)) => {
                run_check(&user_id, ctx, &state, &toast_timers).await;
                true
            }
            None => false,
        }
    }

    /// Re-checks every session a user has mounted. Called after event
    /// saves and deletes so reminder state never waits for the next tick.
    pub async fn refresh_user(&self, user_id: &ID, ctx: &Context) {
        let sessions: Vec<_> = {
            let sessions = self.sessions.lock().unwrap();
            sessions
                .values()
                .filter(|session| &session.user_id == user_id)
                .map(|session| (session.state.clone(), session.toast_timers.clone()))
                .collect()
        };
        for (state, toast_timers) in sessions {
            run_check(user_id, ctx, &state, &toast_timers).await;
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
