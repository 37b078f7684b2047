use polymer_flow::{ControlPanel, Simulation, SimulationConfig};
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn test_simulation_is_sync_and_send() {
    fn assert_sync_send<T: Sync + Send>() {}
    assert_sync_send::<Simulation>();
    assert_sync_send::<ControlPanel>();
}

#[test]
fn test_shared_simulation_across_threads() {
    let config = SimulationConfig::default().with_population(6);
    let sim = Arc::new(Mutex::new(
        Simulation::with_seed(config, 99).expect("valid config"),
    ));

    let mut handles = vec![];
    for _ in 0..4 {
        let sim_clone = Arc::clone(&sim);
        let handle = thread::spawn(move || {
            let mut sim = sim_clone.lock().unwrap();
            sim.advance();
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(sim.lock().unwrap().tick_count(), 4);
}

#[test]
fn test_control_panel_written_from_ui_thread() {
    let config = SimulationConfig::default().with_population(3);
    let mut sim = Simulation::with_seed(config, 5).expect("valid config");
    let panel = ControlPanel::new();
    sim.attach_controls(panel.clone());

    let ui = thread::spawn(move || {
        for step in 0..=10 {
            panel.set_flow_intensity(step as f32 * 10.0);
        }
        panel.resize_population(7);
    });
    ui.join().unwrap();

    sim.advance();
    assert_eq!(sim.flow_intensity(), 100.0);
    assert_eq!(sim.chain_count(), 7);
}
