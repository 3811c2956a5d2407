use approx::assert_relative_eq;
use crane_sim::control::Key;
use crane_sim::delivery::DeliveryStep;
use crane_sim::equipment::{CargoId, CargoState};
use crane_sim::na;
use crane_sim::{CraneSite, SimulationConfig};

const DT: f64 = 1.0 / 60.0;
const MAX_FRAMES: usize = 5000;

fn site() -> CraneSite {
    CraneSite::new(&SimulationConfig::default()).unwrap()
}

/// Hold the hook-down key until the claw picks something up
fn lower_until_pickup(site: &mut CraneSite) -> usize {
    assert!(site.on_key_down(Key::D));
    for frame in 0..MAX_FRAMES {
        site.update(DT);
        if site.step() != DeliveryStep::Idle {
            return frame;
        }
    }
    panic!("claw never touched any cargo");
}

fn run_until_idle(site: &mut CraneSite) -> usize {
    for frame in 0..MAX_FRAMES {
        site.update(DT);
        if site.step() == DeliveryStep::Idle {
            return frame;
        }
    }
    panic!("delivery did not finish, stuck in {:?}", site.step());
}

#[test]
fn delivers_cargo_into_container() {
    let mut site = site();
    let id = site.add_cargo(na::Vector3::new(10.0, 1.0, 0.0), 1.0);

    lower_until_pickup(&mut site);
    assert_eq!(site.step(), DeliveryStep::LiftClaw);
    assert_eq!(site.cargo(id).unwrap().state, CargoState::Held);

    run_until_idle(&mut site);

    let item = site.cargo(id).unwrap();
    let graph = site.graph();
    assert_eq!(item.state, CargoState::Delivered);
    assert_eq!(graph.parent(item.node), Some(site.container().node));
    assert_relative_eq!(graph.position(item.node).y, site.container().height / 2.0);
    assert_relative_eq!(graph.position(item.node).x, 0.0);
    assert_relative_eq!(graph.position(item.node).z, 0.0);

    assert!(site.sequencer().directives().is_idle());
    assert!(site.controls().directives().is_idle());
    assert!(!site.controls().is_suppressed());
    assert_eq!(site.sequencer().delivered_count(), 1);
    assert!(site.sequencer().queue().is_empty());
}

#[test]
fn claw_ends_over_container_at_lift_height() {
    let mut site = site();
    site.add_cargo(na::Vector3::new(10.0, 1.0, 0.0), 1.0);

    lower_until_pickup(&mut site);
    run_until_idle(&mut site);

    let plan = site.sequencer().plan;
    let rig = site.rig();
    let trolley = rig.current_world_position(site.graph(), rig.trolley);

    assert!(rig.hook_height() >= plan.lift_height);
    assert!((rig.wrapped_rotation() - plan.target_bearing).abs() <= plan.angle_tolerance);
    assert!((trolley.x - plan.trolley_target_x).abs() <= plan.position_tolerance);
    // bearing 7π/4 puts the drop point over the container at (6, 0, 6)
    assert_relative_eq!(trolley.z, 6.0, epsilon = 0.2);
}

#[test]
fn keys_ignored_while_delivering() {
    let mut site = site();
    site.add_cargo(na::Vector3::new(10.0, 1.0, 0.0), 1.0);

    lower_until_pickup(&mut site);
    assert!(site.controls().is_suppressed());

    // releasing the held key and pressing others does nothing mid-sequence
    assert!(!site.on_key_up(Key::D));
    assert!(!site.on_key_down(Key::W));
    assert!(site.controls().directives().is_idle());

    let before = site.rig().trolley_offset();
    site.update(DT);
    assert_relative_eq!(site.rig().trolley_offset(), before);

    run_until_idle(&mut site);
    assert!(!site.controls().is_held(Key::D));

    // control is back once the sequence is over
    let parked = site.rig().trolley_offset();
    assert!(site.on_key_down(Key::W));
    site.update(DT);
    assert_eq!(site.controls().directives().trolley, 1);
    assert!(site.rig().trolley_offset() > parked);
}

fn hold(site: &mut CraneSite, key: Key, frames: usize) {
    assert!(site.on_key_down(key));
    for _ in 0..frames {
        site.update(DT);
    }
    assert!(site.on_key_up(key));
}

#[test]
fn second_item_waits_for_next_cycle() {
    let mut site = site();
    // both sit under the claw, close enough to be hit on the same frame
    let first = site.add_cargo(na::Vector3::new(10.0, 1.0, 0.5), 1.0);
    let second = site.add_cargo(na::Vector3::new(10.0, 1.0, -0.5), 1.0);

    lower_until_pickup(&mut site);
    assert_eq!(site.sequencer().active_item(), Some(first));
    assert_eq!(site.sequencer().queue().len(), 2);
    assert_eq!(site.cargo(second).unwrap().state, CargoState::Free);

    run_until_idle(&mut site);
    assert_eq!(site.cargo(first).unwrap().state, CargoState::Delivered);
    assert_eq!(site.cargo(second).unwrap().state, CargoState::Free);

    // the claw is over the container now, nowhere near the second item
    site.update(DT);
    assert_eq!(site.step(), DeliveryStep::Idle);
    assert!(site.sequencer().queue().is_empty());
    let item = site.cargo(second).unwrap();
    assert_eq!(item.state, CargoState::Free);
    assert_eq!(site.graph().parent(item.node), Some(site.graph().root()));
    assert_relative_eq!(item.world_center(site.graph()).x, 10.0);

    // swing back over it by hand and the next collision pass takes it
    hold(&mut site, Key::Q, 94);
    hold(&mut site, Key::W, 18);
    assert_eq!(site.step(), DeliveryStep::Idle);
    lower_until_pickup(&mut site);
    assert_eq!(site.sequencer().active_item(), Some(second));
    assert_eq!(site.cargo(second).unwrap().state, CargoState::Held);

    run_until_idle(&mut site);
    assert_eq!(site.cargo(second).unwrap().state, CargoState::Delivered);
    assert_eq!(site.sequencer().delivered_count(), 2);
}

#[test]
fn coarse_frames_still_finish_delivery() {
    for dt in [0.05, 0.1] {
        let mut site = site();
        let id = site.add_cargo(na::Vector3::new(10.0, 1.0, 0.0), 1.0);

        assert!(site.on_key_down(Key::D));
        let mut frames = 0;
        while site.step() == DeliveryStep::Idle {
            site.update(dt);
            frames += 1;
            assert!(frames < 1000, "no pickup at dt = {dt}");
        }
        while site.step() != DeliveryStep::Idle {
            site.update(dt);
            frames += 1;
            assert!(frames < 2000, "stuck in {:?} at dt = {dt}", site.step());
        }

        let item = site.cargo(id).unwrap();
        assert_eq!(item.state, CargoState::Delivered);
        assert_eq!(site.graph().parent(item.node), Some(site.container().node));
    }
}

#[test]
fn delivered_cargo_never_collides_again() {
    let mut site = site();
    let id = site.add_cargo(na::Vector3::new(10.0, 1.0, 0.0), 1.0);
    lower_until_pickup(&mut site);
    run_until_idle(&mut site);

    // drive the claw straight down into the container
    assert!(site.on_key_down(Key::D));
    for _ in 0..600 {
        site.update(DT);
        assert_eq!(site.step(), DeliveryStep::Idle);
    }
    assert_eq!(site.cargo(id).unwrap().state, CargoState::Delivered);
    assert_eq!(site.sequencer().delivered_count(), 1);
}

#[test]
fn far_cargo_is_left_alone() {
    let mut site = site();
    let id = site.add_cargo(na::Vector3::new(-15.0, 1.0, 0.0), 1.0);

    assert!(site.on_key_down(Key::D));
    for _ in 0..600 {
        site.update(DT);
    }
    assert_eq!(site.step(), DeliveryStep::Idle);
    assert_eq!(site.cargo(id).unwrap().state, CargoState::Free);
    assert_eq!(site.cargo(CargoId(7)).map(|item| item.id), None);
}
