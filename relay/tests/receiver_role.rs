//! Receiver role: pulse trains on the capture pins through to the PWM outputs.

mod common;

use common::{CaptureTimer, Pwm};
use pwm_relay::{
    config::{LIVENESS_TIMEOUT_TICKS, PWM_CEILING},
    CaptureState, Channel, Edge, OutputStage, Processor, Receiver, SignalProcessor,
};

struct Board {
    processor: Processor,
    receiver: Receiver,
    timer: CaptureTimer,
    pwm: Pwm,
    output: OutputStage,
}

impl Board {
    fn new() -> Self {
        let processor = Processor::new();
        let mut receiver = Receiver::new();
        let mut timer = CaptureTimer::default();
        // Arm for the wrong edge so reset has to fix it
        timer.edge = [Edge::Falling; 2];
        processor.reset();
        receiver.reset(&mut timer);
        Self {
            processor,
            receiver,
            timer,
            pwm: Pwm::default(),
            output: OutputStage::new(),
        }
    }

    /// Pin changes to `edge` at `tick`, the capture interrupt runs if the unit latched
    fn input(&mut self, channel: Channel, edge: Edge, tick: u16) -> usize {
        if self.timer.input(channel, edge, tick) {
            self.receiver.dispatch(&mut self.timer, &self.processor)
        } else {
            0
        }
    }

    fn pulse(&mut self, channel: Channel, start: u16, width: u16) {
        self.input(channel, Edge::Rising, start);
        self.input(channel, Edge::Falling, start.wrapping_add(width));
    }

    fn tick(&mut self) -> [u8; 2] {
        self.pwm.tick_pending = true;
        self.output.on_tick(&self.processor, &mut self.pwm);
        assert!(!self.pwm.tick_pending);
        self.pwm.duties
    }
}

#[test]
fn reset_arms_rising_edge() {
    let board = Board::new();
    assert_eq!(board.timer.edge, [Edge::Rising; 2]);
    assert_eq!(board.receiver.state(Channel::Zero), CaptureState::AwaitingRising);
}

#[test]
fn pulse_width_becomes_duty() {
    let mut board = Board::new();
    assert_eq!(board.tick(), [0, 0]);

    board.pulse(Channel::Zero, 100, 50);
    board.pulse(Channel::One, 400, 130);
    assert_eq!(board.tick(), [50, 130]);
    assert_eq!(board.timer.edge, [Edge::Rising; 2]);
}

#[test]
fn width_across_counter_wrap() {
    let mut board = Board::new();
    board.pulse(Channel::Zero, u16::MAX - 4, 15);
    board.pulse(Channel::One, 0, 1);
    assert_eq!(board.tick(), [15, 1]);
}

#[test]
fn wide_pulse_clamped() {
    let mut board = Board::new();
    board.pulse(Channel::Zero, 10, 5000);
    board.pulse(Channel::One, 10, u16::from(PWM_CEILING));
    assert_eq!(board.tick(), [PWM_CEILING, PWM_CEILING]);
}

#[test]
fn interleaved_channels_stay_independent() {
    let mut board = Board::new();
    board.input(Channel::Zero, Edge::Rising, 1000);
    board.input(Channel::One, Edge::Rising, 1010);
    board.input(Channel::One, Edge::Falling, 1040);
    board.input(Channel::Zero, Edge::Falling, 1090);
    assert_eq!(board.tick(), [90, 30]);
}

#[test]
fn simultaneous_captures_handled_in_one_dispatch() {
    let mut board = Board::new();
    board.timer.input(Channel::Zero, Edge::Rising, 20);
    board.timer.input(Channel::One, Edge::Rising, 20);
    assert_eq!(board.receiver.dispatch(&mut board.timer, &board.processor), 2);
    assert_eq!(board.timer.edge, [Edge::Falling; 2]);
    assert_eq!(board.receiver.dispatch(&mut board.timer, &board.processor), 0);
}

#[test]
fn signal_loss_fails_safe() {
    let mut board = Board::new();
    board.pulse(Channel::Zero, 0, 75);
    board.pulse(Channel::One, 0, 80);
    for _ in 0..LIVENESS_TIMEOUT_TICKS {
        assert_eq!(board.tick(), [75, 80]);
    }
    assert_eq!(board.tick(), [0, 0]);

    board.pulse(Channel::Zero, 500, 76);
    board.pulse(Channel::One, 500, 81);
    assert_eq!(board.tick(), [76, 81]);
}

#[test]
fn missed_falling_edge_measures_one_bogus_width() {
    let mut board = Board::new();
    board.input(Channel::Zero, Edge::Rising, 100);
    // Falling edge at 150 lost, unit stays armed for falling
    board.input(Channel::Zero, Edge::Rising, 300);
    assert_eq!(board.receiver.state(Channel::Zero), CaptureState::AwaitingFalling);

    // Next falling edge closes a pulse that started at 100
    board.input(Channel::Zero, Edge::Falling, 350);
    assert_eq!(board.processor.duty_value(Channel::Zero), PWM_CEILING);

    // Back in step from the following pulse
    board.pulse(Channel::Zero, 500, 50);
    assert_eq!(board.processor.duty_value(Channel::Zero), 50);
}

#[test]
fn edges_of_wrong_polarity_are_ignored() {
    let mut board = Board::new();
    assert_eq!(board.input(Channel::One, Edge::Falling, 10), 0);
    assert_eq!(board.receiver.state(Channel::One), CaptureState::AwaitingRising);
}
