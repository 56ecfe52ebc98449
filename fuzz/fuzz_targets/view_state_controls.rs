#![no_main]

use libfuzzer_sys::fuzz_target;
use mep_dashboard::{StepId, ViewState, ZoomController, ZoomProfile, DEFAULT_ZOOM};

fuzz_target!(|data: &[u8]| {
    let profile = if data.first().is_some_and(|byte| byte & 1 == 1) {
        ZoomProfile::Compact
    } else {
        ZoomProfile::Desktop
    };
    let mut state = ViewState::new(profile);
    for byte in data.iter().skip(1) {
        match byte % 6 {
            0 => state.zoom.zoom_in(),
            1 => state.zoom.zoom_out(),
            2 => state.zoom.reset(),
            3 => {
                let _ = state.stage.select(Some(byte / 6));
            }
            4 => {
                let before = state.panels.clone();
                if state.panels.toggle(byte / 6).is_ok() {
                    let _ = state.panels.toggle(byte / 6);
                    assert_eq!(state.panels, before);
                }
            }
            _ => state.stage.view_all(),
        }
        let zoom = state.zoom.value();
        assert!(zoom >= profile.min() && zoom <= profile.max());
        if let Some(stage) = state.stage.selected() {
            assert!((1..=5).contains(&stage.get()));
        }
        assert!(state.panels.expanded_steps().all(|step| StepId::new(step.get()).is_some()));
    }
    if let Some(raw) = data.get(1..9).and_then(|bytes| <[u8; 8]>::try_from(bytes).ok()) {
        let restored = ZoomController::with_value(profile, f64::from_le_bytes(raw));
        assert!(restored.value() >= profile.min() && restored.value() <= profile.max());
    }
    state.zoom.reset();
    assert_eq!(state.zoom.value(), DEFAULT_ZOOM);
});
