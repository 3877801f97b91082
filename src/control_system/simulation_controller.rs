use crate::control_system::phase_scheduler::PhaseScheduler;
use crate::data_structures::Direction;
use crate::error::SimulationError;
use crate::global_variables::TimingConfig;
use crate::shared_data::{IntersectionSnapshot, PhaseTransition};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

const COMMAND_BUFFER: usize = 32;
const TRANSITION_BUFFER: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Toggle,
    Reset,
    SetGreenDuration(Direction, String),
    SetAllGreenDurations(String),
    Snapshot,
    Shutdown,
}

struct Request {
    command: Command,
    reply: oneshot::Sender<IntersectionSnapshot>,
}

/// Owns the phase scheduler and turns its deadlines into real timers.
///
/// All state lives inside a single task, so every transition and command is
/// applied one after another on the same timeline.
pub struct SimulationController {
    scheduler: PhaseScheduler,
    origin: Instant,
    commands: mpsc::Receiver<Request>,
    snapshots: watch::Sender<IntersectionSnapshot>,
    transitions: broadcast::Sender<PhaseTransition>,
}

impl SimulationController {
    /// Spawns the controller task on the current tokio runtime.
    pub fn spawn(config: TimingConfig) -> (ControllerHandle, JoinHandle<()>) {
        let scheduler = PhaseScheduler::new(config);
        let origin = Instant::now();
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(scheduler.snapshot(origin.elapsed()));
        let (transition_tx, _) = broadcast::channel(TRANSITION_BUFFER);

        let handle = ControllerHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            transitions: transition_tx.clone(),
        };
        let controller = SimulationController {
            scheduler,
            origin,
            commands: command_rx,
            snapshots: snapshot_tx,
            transitions: transition_tx,
        };
        let task = tokio::spawn(controller.run());
        (handle, task)
    }

    async fn run(mut self) {
        loop {
            let deadline = self.scheduler.next_deadline().map(|d| self.origin + d);
            tokio::select! {
                biased;
                _ = wait_for(deadline) => {
                    let now = self.origin.elapsed();
                    let fired = self.scheduler.advance_to(now);
                    self.publish();
                    for transition in fired {
                        // No subscribers is fine.
                        let _ = self.transitions.send(transition);
                    }
                }
                request = self.commands.recv() => {
                    let Some(Request { command, reply }) = request else {
                        log::info!("All controller handles dropped, shutting down");
                        break;
                    };
                    let shutdown = command == Command::Shutdown;
                    self.apply(command);
                    let snapshot = self.publish();
                    let _ = reply.send(snapshot);
                    if shutdown {
                        log::info!("Simulation controller shut down");
                        break;
                    }
                }
            }
        }
    }

    fn apply(&mut self, command: Command) {
        let now = self.origin.elapsed();
        match command {
            Command::Start => {
                self.scheduler.start(now);
            }
            Command::Stop | Command::Shutdown => {
                self.scheduler.stop(now);
            }
            Command::Toggle => {
                self.scheduler.toggle(now);
            }
            Command::Reset => self.scheduler.reset(now),
            Command::SetGreenDuration(direction, raw) => {
                self.scheduler.set_green_duration(direction, &raw);
            }
            Command::SetAllGreenDurations(raw) => {
                self.scheduler.set_all_green_durations(&raw);
            }
            Command::Snapshot => {}
        }
    }

    fn publish(&self) -> IntersectionSnapshot {
        let snapshot = self.scheduler.snapshot(self.origin.elapsed());
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Cheap, cloneable front end to a running `SimulationController`.
#[derive(Clone)]
pub struct ControllerHandle {
    commands: mpsc::Sender<Request>,
    snapshots: watch::Receiver<IntersectionSnapshot>,
    transitions: broadcast::Sender<PhaseTransition>,
}

impl ControllerHandle {
    pub async fn start(&self) -> Result<IntersectionSnapshot, SimulationError> {
        self.request(Command::Start).await
    }

    pub async fn stop(&self) -> Result<IntersectionSnapshot, SimulationError> {
        self.request(Command::Stop).await
    }

    pub async fn toggle(&self) -> Result<IntersectionSnapshot, SimulationError> {
        self.request(Command::Toggle).await
    }

    pub async fn reset(&self) -> Result<IntersectionSnapshot, SimulationError> {
        self.request(Command::Reset).await
    }

    pub async fn set_green_duration(
        &self,
        direction: Direction,
        raw_seconds: &str,
    ) -> Result<IntersectionSnapshot, SimulationError> {
        self.request(Command::SetGreenDuration(direction, raw_seconds.to_string()))
            .await
    }

    pub async fn set_all_green_durations(
        &self,
        raw_seconds: &str,
    ) -> Result<IntersectionSnapshot, SimulationError> {
        self.request(Command::SetAllGreenDurations(raw_seconds.to_string()))
            .await
    }

    pub async fn snapshot(&self) -> Result<IntersectionSnapshot, SimulationError> {
        self.request(Command::Snapshot).await
    }

    /// Stops the rotation and ends the controller task.
    pub async fn shutdown(&self) -> Result<IntersectionSnapshot, SimulationError> {
        self.request(Command::Shutdown).await
    }

    /// Last published snapshot, without a round trip to the controller.
    pub fn latest(&self) -> IntersectionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified on every published snapshot.
    pub fn watch(&self) -> watch::Receiver<IntersectionSnapshot> {
        self.snapshots.clone()
    }

    pub fn subscribe_transitions(&self) -> broadcast::Receiver<PhaseTransition> {
        self.transitions.subscribe()
    }

    pub async fn send(&self, command: Command) -> Result<IntersectionSnapshot, SimulationError> {
        self.request(command).await
    }

    async fn request(&self, command: Command) -> Result<IntersectionSnapshot, SimulationError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Request { command, reply })
            .await
            .map_err(|_| SimulationError::ControllerClosed)?;
        response.await.map_err(|_| SimulationError::ControllerClosed)
    }
}
