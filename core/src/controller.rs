//! Discrete and continuous stepping of an automaton.
//!
//! Continuous play runs on two background threads. The stepper computes a
//! generation every interval and leaves it in a single-slot mailbox; the
//! courier takes whatever is in the mailbox and hands it to the caller's sink.
//! A slow sink therefore never holds up the stepper: an undelivered generation
//! is simply replaced by the next one, and generations still arrive in
//! increasing order.

use log::{error, info, trace, warn};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::automaton::{Automaton, Generation};
use crate::cell::Cell;
use crate::error::SimResult;
use crate::sim::Simulate;

/// Drives one automaton, either one generation at a time or continuously on a
/// background thread.
///
/// `step()` and continuous play share one lock on the automaton, so no caller
/// ever observes a generation that is still being computed.
#[derive(Debug)]
pub struct Controller<C: Cell> {
    automaton: Arc<Mutex<Automaton<C>>>,
    player: Mutex<Option<Player<C>>>,
}
impl<C: Cell> Drop for Controller<C> {
    fn drop(&mut self) {
        trace!("Dropping controller");
        self.pause();
    }
}
impl<C: Cell> Controller<C> {
    /// Constructs a paused controller for an automaton.
    pub fn new(automaton: Automaton<C>) -> Self {
        Self {
            automaton: Arc::new(Mutex::new(automaton)),
            player: Mutex::new(None),
        }
    }

    /// Steps forward by exactly one generation and returns it.
    pub fn step(&self) -> SimResult<Generation<C>> {
        let mut automaton = self.automaton.lock();
        automaton.step()?;
        Ok(automaton.snapshot())
    }

    /// Starts stepping every `interval` on a background thread, handing each
    /// generation to `sink`.
    ///
    /// If a step fails, the error is handed to `sink` and playback halts.
    /// Returns `false` without doing anything if the controller is already
    /// playing.
    pub fn play(
        &self,
        interval: Duration,
        sink: impl 'static + Send + FnMut(SimResult<Generation<C>>),
    ) -> bool {
        let finished = {
            let mut player = self.player.lock();
            if player.as_ref().map_or(false, Player::is_running) {
                warn!("Ignoring play request; already playing");
                return false;
            }
            player.take()
        };
        // A player that halted on its own still has threads to reap. Its sink
        // may call back into the controller, so reap it without the lock held.
        if let Some(finished) = finished {
            finished.stop();
        }

        let mut player = self.player.lock();
        if player.is_some() {
            warn!("Ignoring play request; already playing");
            return false;
        }
        info!("Playing every {:?}", interval);
        *player = Some(Player::spawn(Arc::clone(&self.automaton), interval, sink));
        true
    }

    /// Stops continuous play, letting any in-flight generation complete and
    /// reach the sink first. Does nothing if the controller is not playing.
    pub fn pause(&self) {
        // Release the player lock before joining, in case the sink calls back
        // into the controller.
        let player = self.player.lock().take();
        if let Some(p) = player {
            info!("Pausing");
            p.stop();
        }
    }

    /// Alias of `pause()`.
    pub fn stop(&self) {
        self.pause()
    }

    /// Returns whether the controller is playing continuously.
    pub fn is_playing(&self) -> bool {
        self.player.lock().as_ref().map_or(false, Player::is_running)
    }

    /// Returns the latest completed generation without stepping.
    pub fn snapshot(&self) -> Generation<C> {
        self.automaton.lock().snapshot()
    }

    /// Returns the number of generations that have elapsed.
    pub fn generation_count(&self) -> u64 {
        self.automaton.lock().generation_count()
    }

    /// Stops continuous play and replaces the automaton.
    pub fn reset(&self, automaton: Automaton<C>) {
        self.pause();
        *self.automaton.lock() = automaton;
        trace!("Controller reset");
    }
}

/// Flags and mailbox shared between a player's threads and the controller.
#[derive(Debug)]
struct PlayState<C> {
    /// Set by the controller to stop the stepper.
    cancelled: bool,
    /// Set by the stepper once it has exited.
    closed: bool,
    /// Latest generation not yet taken by the courier.
    mailbox: Option<SimResult<Generation<C>>>,
}

#[derive(Debug)]
struct Player<C> {
    shared: Arc<(Mutex<PlayState<C>>, Condvar)>,
    stepper: JoinHandle<()>,
    courier: JoinHandle<()>,
}
impl<C: Cell> Player<C> {
    fn spawn(
        automaton: Arc<Mutex<Automaton<C>>>,
        interval: Duration,
        mut sink: impl 'static + Send + FnMut(SimResult<Generation<C>>),
    ) -> Self {
        let shared = Arc::new((
            Mutex::new(PlayState {
                cancelled: false,
                closed: false,
                mailbox: None,
            }),
            Condvar::new(),
        ));

        let shared_2 = Arc::clone(&shared);
        let stepper = thread::spawn(move || {
            let (lock, condvar) = &*shared_2;
            let mut deadline = Instant::now() + interval;
            loop {
                let mut state = lock.lock();
                while !state.cancelled {
                    if condvar.wait_until(&mut state, deadline).timed_out() {
                        break;
                    }
                }
                if state.cancelled {
                    break;
                }
                drop(state); // unlock while stepping

                let result = {
                    let mut automaton = automaton.lock();
                    automaton.step().map(|()| automaton.snapshot())
                };
                let failed = result.is_err();
                if let Err(e) = &result {
                    error!("Halting playback: {}", e);
                }

                let mut state = lock.lock();
                state.mailbox = Some(result);
                condvar.notify_all();
                if failed {
                    break;
                }
                deadline = Instant::max(deadline + interval, Instant::now());
            }
            lock.lock().closed = true;
            condvar.notify_all();
            trace!("Stepper thread exited");
        });

        let shared_3 = Arc::clone(&shared);
        let courier = thread::spawn(move || {
            let (lock, condvar) = &*shared_3;
            loop {
                let mut state = lock.lock();
                let delivery = loop {
                    if let Some(delivery) = state.mailbox.take() {
                        break Some(delivery);
                    }
                    if state.closed {
                        break None;
                    }
                    condvar.wait(&mut state);
                };
                drop(state); // unlock while the sink runs

                match delivery {
                    Some(delivery) => sink(delivery),
                    None => break,
                }
            }
            trace!("Courier thread exited");
        });

        Self {
            shared,
            stepper,
            courier,
        }
    }

    fn is_running(&self) -> bool {
        !self.shared.0.lock().closed
    }

    /// Cancels the stepper and waits for both threads to exit.
    fn stop(self) {
        let (lock, condvar) = &*self.shared;
        lock.lock().cancelled = true;
        condvar.notify_all();

        if self.stepper.join().is_err() {
            error!("Stepper thread panicked");
        }
        // The sink may stop playback itself, from the courier thread.
        if self.courier.thread().id() != thread::current().id() && self.courier.join().is_err() {
            error!("Courier thread panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;
    use std::sync::mpsc;

    use super::*;
    use crate::coord::Coord;
    use crate::grid::Grid;
    use crate::sim::rule::{AgentRule, CellRule, LifeState, LIFE};

    fn block_controller() -> Controller<LifeState> {
        let grid = Grid::filled(6, 6, LifeState::Dead).unwrap();
        Controller::new(Automaton::new(grid, LIFE.into_rule()))
    }

    fn wait_for(mut condition: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !condition() {
            assert!(Instant::now() < deadline, "timed out");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_play_twice_spawns_one_task() {
        let controller = block_controller();
        let delivered = Arc::new(Mutex::new(vec![]));

        let d = Arc::clone(&delivered);
        assert!(controller.play(Duration::from_millis(1), move |g| {
            d.lock().push(g.unwrap().index)
        }));
        assert!(!controller.play(Duration::from_millis(1), |_| {
            panic!("second sink must never be called")
        }));
        assert!(controller.is_playing());

        wait_for(|| delivered.lock().len() >= 3);
        controller.pause();
        assert!(!controller.is_playing());

        let delivered = delivered.lock().clone();
        assert!(delivered.windows(2).all(|w| w[0] < w[1]));
        assert!(*delivered.last().unwrap() <= controller.generation_count());
    }

    #[test]
    fn test_slow_sink_does_not_hold_up_stepping() {
        let controller = block_controller();
        let delivered = Arc::new(Mutex::new(vec![]));

        let d = Arc::clone(&delivered);
        controller.play(Duration::from_millis(1), move |g| {
            d.lock().push(g.unwrap().index);
            thread::sleep(Duration::from_millis(50));
        });
        wait_for(|| delivered.lock().len() >= 4);
        controller.pause();

        let delivered = delivered.lock().clone();
        assert!(controller.generation_count() > delivered.len() as u64);
        assert!(delivered.windows(2).all(|w| w[0] < w[1]));
        // Undelivered generations were replaced by newer ones.
        assert!(delivered.windows(2).any(|w| w[1] - w[0] > 1));
    }

    #[test]
    fn test_pause_then_step() {
        let controller = block_controller();
        controller.pause(); // no-op
        controller.play(Duration::from_millis(1), |_| ());
        wait_for(|| controller.generation_count() >= 2);
        controller.pause();
        controller.pause();

        let before = controller.generation_count();
        thread::sleep(Duration::from_millis(10));
        assert_eq!(before, controller.generation_count());
        let generation = controller.step().unwrap();
        assert_eq!(before + 1, generation.index);
        assert_eq!(before + 1, controller.generation_count());
        assert_eq!(generation.index, controller.snapshot().index);
    }

    #[test]
    fn test_replay_after_pause() {
        let controller = block_controller();
        for _ in 0..3 {
            assert!(controller.play(Duration::from_millis(1), |_| ()));
            controller.pause();
        }
        controller.reset(Automaton::new(
            Grid::filled(2, 2, LifeState::Alive).unwrap(),
            LIFE.into_rule(),
        ));
        assert_eq!(0, controller.generation_count());
        assert_eq!(2, controller.snapshot().grid().width());
    }

    #[derive(Debug)]
    struct OffTheMap;
    impl fmt::Display for OffTheMap {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "off the map")
        }
    }
    impl AgentRule<LifeState> for OffTheMap {
        fn advance(&mut self, grid: &mut Grid<LifeState>) -> SimResult<()> {
            grid.set(Coord::new(-1, 0), LifeState::Alive)?;
            Ok(())
        }
    }

    #[test]
    fn test_error_halts_playback() {
        let grid = Grid::filled(3, 3, LifeState::Dead).unwrap();
        let controller = Controller::new(Automaton::new(grid, OffTheMap.into_rule()));
        let delivered = Arc::new(Mutex::new(vec![]));

        let d = Arc::clone(&delivered);
        controller.play(Duration::from_millis(1), move |g| d.lock().push(g));
        wait_for(|| !controller.is_playing());
        controller.pause();

        let delivered = delivered.lock();
        assert_eq!(1, delivered.len());
        assert!(delivered[0].is_err());
        assert_eq!(0, controller.generation_count());

        // A halted controller can be played again.
        assert!(controller.play(Duration::from_millis(1), |_| ()));
    }

    #[test]
    fn test_replay_while_sink_pauses() {
        let grid = Grid::filled(3, 3, LifeState::Dead).unwrap();
        let controller = Arc::new(Controller::new(Automaton::new(grid, OffTheMap.into_rule())));
        let errors = Arc::new(Mutex::new(0));

        let (weak, e) = (Arc::downgrade(&controller), Arc::clone(&errors));
        controller.play(Duration::from_millis(1), move |g| {
            if g.is_err() {
                *e.lock() += 1;
                thread::sleep(Duration::from_millis(50));
                if let Some(c) = weak.upgrade() {
                    c.pause();
                }
            }
        });
        // The stepper has halted; the courier is still inside the sink.
        wait_for(|| !controller.is_playing());

        let (tx, rx) = mpsc::channel();
        let c = Arc::clone(&controller);
        thread::spawn(move || tx.send(c.play(Duration::from_millis(1), |_| ())));
        let replayed = rx
            .recv_timeout(Duration::from_secs(10))
            .expect("play() never returned");
        assert!(replayed);
        assert_eq!(1, *errors.lock());

        controller.pause();
        assert!(!controller.is_playing());
        assert_eq!(0, controller.generation_count());
    }
}
