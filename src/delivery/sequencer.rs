use log::{debug, info, warn};
use serde::Serialize;
use std::f64::consts::PI;

use crate::collision::CollisionQueue;
use crate::control::{Axis, Directives, ManualControlState};
use crate::delivery::plan::DeliveryPlan;
use crate::equipment::{CargoId, CargoItem, CargoState, ContainerTarget, CraneRig};
use crate::kinematics::JointTargets;
use crate::scene::SceneGraph;
use crate::types::angular_distance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DeliveryStep {
    #[default]
    Idle,
    LiftClaw,
    RotateToContainer,
    MoveTrolleyToContainer,
    LowerClaw,
    LiftAfterRelease,
}

impl DeliveryStep {
    /// Step that follows once this one's target is reached
    pub fn successor(self) -> DeliveryStep {
        match self {
            DeliveryStep::Idle => DeliveryStep::Idle,
            DeliveryStep::LiftClaw => DeliveryStep::RotateToContainer,
            DeliveryStep::RotateToContainer => DeliveryStep::MoveTrolleyToContainer,
            DeliveryStep::MoveTrolleyToContainer => DeliveryStep::LowerClaw,
            DeliveryStep::LowerClaw => DeliveryStep::LiftAfterRelease,
            DeliveryStep::LiftAfterRelease => DeliveryStep::Idle,
        }
    }
}

/// Rig readings the transition function decides on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Slew angle wrapped into [0, 2π)
    pub rotation: f64,
    /// Trolley x relative to the crane base
    pub trolley_x: f64,
    pub hook_height: f64,
}

impl Observation {
    pub fn capture(graph: &SceneGraph, rig: &CraneRig) -> Self {
        Self {
            rotation: rig.wrapped_rotation(),
            trolley_x: rig.current_world_position(graph, rig.trolley).x,
            hook_height: rig.hook_height(),
        }
    }
}

/// Slew direction toward `target`
///
/// Half-plane test: +1 while the angle sits in [target - π, target), -1
/// otherwise. Ties at the antipode go positive.
pub fn rotation_direction(rotation: f64, target: f64) -> i8 {
    if rotation >= target - PI && rotation < target {
        1
    } else {
        -1
    }
}

fn drive(step: DeliveryStep, obs: &Observation, plan: &DeliveryPlan) -> Directives {
    let mut directives = Directives::default();
    match step {
        DeliveryStep::Idle => {}
        DeliveryStep::LiftClaw | DeliveryStep::LiftAfterRelease => directives.set(Axis::Hook, 1),
        DeliveryStep::RotateToContainer => {
            directives.set(Axis::Rotate, rotation_direction(obs.rotation, plan.target_bearing));
        }
        DeliveryStep::MoveTrolleyToContainer => {
            // running the trolley out moves it along the jib's current heading
            let outward: i8 = if obs.rotation.cos() >= 0.0 { 1 } else { -1 };
            let towards: i8 = if obs.trolley_x < plan.trolley_target_x { 1 } else { -1 };
            directives.set(Axis::Trolley, outward * towards);
        }
        DeliveryStep::LowerClaw => directives.set(Axis::Hook, -1),
    }
    directives
}

/// Where the driven joint must stop so coarse frames cannot step across the target
pub fn stop_targets(step: DeliveryStep, obs: &Observation, plan: &DeliveryPlan) -> JointTargets {
    let mut targets = JointTargets::default();
    match step {
        DeliveryStep::RotateToContainer => targets.rotation = Some(plan.target_bearing),
        DeliveryStep::MoveTrolleyToContainer => {
            let c = obs.rotation.cos();
            if c.abs() > 1e-9 {
                targets.trolley_offset = Some(plan.trolley_target_x / c);
            }
        }
        _ => {}
    }
    targets
}

fn reached(step: DeliveryStep, obs: &Observation, plan: &DeliveryPlan) -> bool {
    match step {
        DeliveryStep::Idle => false,
        DeliveryStep::LiftClaw | DeliveryStep::LiftAfterRelease => obs.hook_height >= plan.lift_height,
        DeliveryStep::RotateToContainer => {
            angular_distance(obs.rotation, plan.target_bearing) <= plan.angle_tolerance
        }
        DeliveryStep::MoveTrolleyToContainer => {
            (obs.trolley_x - plan.trolley_target_x).abs() <= plan.position_tolerance
        }
        DeliveryStep::LowerClaw => obs.hook_height <= plan.release_height,
    }
}

/// Pure transition: the step to be in after this observation and what to drive next frame
pub fn next_step(step: DeliveryStep, obs: &Observation, plan: &DeliveryPlan) -> (DeliveryStep, Directives) {
    let next = if reached(step, obs, plan) { step.successor() } else { step };
    (next, drive(next, obs, plan))
}

/// Everything a tick may touch
pub struct DeliveryContext<'a> {
    pub graph: &'a mut SceneGraph,
    pub rig: &'a CraneRig,
    pub cargo: &'a mut [CargoItem],
    pub container: &'a ContainerTarget,
    pub controls: &'a mut ManualControlState,
    /// Items the collision pass found touching the claw this frame
    pub touching: &'a [CargoId],
}

#[derive(Debug, Clone)]
pub struct DeliverySequencer {
    pub plan: DeliveryPlan,
    step: DeliveryStep,
    queue: CollisionQueue,
    directives: Directives,
    targets: JointTargets,
    active: Option<CargoId>,
    delivered: usize,
}

impl DeliverySequencer {
    pub fn new(plan: DeliveryPlan) -> Self {
        Self {
            plan,
            step: DeliveryStep::Idle,
            queue: CollisionQueue::new(),
            directives: Directives::default(),
            targets: JointTargets::default(),
            active: None,
            delivered: 0,
        }
    }

    pub fn step(&self) -> DeliveryStep {
        self.step
    }

    pub fn is_idle(&self) -> bool {
        self.step == DeliveryStep::Idle
    }

    /// Directives the kinematics should apply while a delivery runs
    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    /// Stop points matching [`directives`](Self::directives)
    pub fn targets(&self) -> &JointTargets {
        &self.targets
    }

    pub fn queue(&self) -> &CollisionQueue {
        &self.queue
    }

    pub fn active_item(&self) -> Option<CargoId> {
        self.active
    }

    pub fn delivered_count(&self) -> usize {
        self.delivered
    }

    /// Queue a collided item; duplicates are dropped
    pub fn enqueue(&mut self, id: CargoId) -> bool {
        self.queue.push(id)
    }

    /// Advance one frame. Returns the step after the tick.
    pub fn tick(&mut self, mut ctx: DeliveryContext<'_>) -> DeliveryStep {
        if self.step == DeliveryStep::Idle {
            self.arm(ctx);
            return self.step;
        }

        let obs = Observation::capture(ctx.graph, ctx.rig);
        let (next, directives) = next_step(self.step, &obs, &self.plan);

        if next != self.step {
            debug!("delivery {:?} -> {:?}", self.step, next);
            match (self.step, next) {
                (DeliveryStep::LowerClaw, DeliveryStep::LiftAfterRelease) => self.release(&mut ctx),
                (DeliveryStep::LiftAfterRelease, DeliveryStep::Idle) => {
                    ctx.controls.restore();
                    self.delivered += 1;
                    info!("delivery complete, {} item(s) still queued", self.queue.len());
                }
                _ => {}
            }
        }

        self.step = next;
        self.directives = directives;
        self.targets = stop_targets(next, &obs, &self.plan);
        self.step
    }

    fn arm(&mut self, ctx: DeliveryContext<'_>) {
        while let Some(id) = self.queue.front() {
            let Some(item) = ctx.cargo.iter_mut().find(|item| item.id == id) else {
                warn!("queued cargo {} does not exist, dropping it", id.0);
                self.queue.pop_front();
                continue;
            };
            if !item.is_free() {
                warn!("queued cargo {} is no longer free, dropping it", id.0);
                self.queue.pop_front();
                continue;
            }
            if !ctx.touching.contains(&id) {
                debug!("queued cargo {} is out of the claw's reach, dropping it", id.0);
                self.queue.pop_front();
                continue;
            }

            ctx.graph.attach(item.node, ctx.rig.claw);
            item.state = CargoState::Held;
            ctx.controls.suppress();

            self.active = Some(id);
            self.step = DeliveryStep::LiftClaw;
            let obs = Observation::capture(ctx.graph, ctx.rig);
            self.directives = drive(self.step, &obs, &self.plan);
            self.targets = stop_targets(self.step, &obs, &self.plan);

            info!("picked up cargo {}, starting delivery", id.0);
            return;
        }
    }

    fn release(&mut self, ctx: &mut DeliveryContext<'_>) {
        let Some(id) = self.queue.pop_front() else {
            return;
        };
        self.active = None;

        if let Some(item) = ctx.cargo.iter_mut().find(|item| item.id == id) {
            ctx.container.receive(ctx.graph, item);
            info!("released cargo {} into the container", id.0);
        }
    }
}
