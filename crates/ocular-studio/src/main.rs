mod grid;

use anyhow::Result;
use glam::{EulerRot, Mat4, Quat, Vec3};

use ocular_engine::core::{App, AppControl, WgpuSession};
use ocular_engine::device::{Gpu, GpuInit};
use ocular_engine::hmd::{HmdConfig, SimulatedHmd, SimulatedHmdConfig, KEY_EYE_HEIGHT, KEY_IPD};
use ocular_engine::logging::{init_logging, LoggingConfig};
use ocular_engine::window::{Runtime, RuntimeConfig};

use grid::GridScene;

/// Frames between host-timing reports.
const REPORT_EVERY: i64 = 375;

/// Wires the simulated headset and the floor grid into the runtime.
struct Studio {
    ipd: f32,
    eye_height: f32,
}

impl App for Studio {
    type Device = SimulatedHmd;
    type Scene = GridScene;

    fn create_device(&mut self) -> Result<SimulatedHmd> {
        let mut hmd = SimulatedHmd::new(SimulatedHmdConfig::default());
        hmd.set_config_value(KEY_IPD, self.ipd);
        hmd.set_config_value(KEY_EYE_HEIGHT, self.eye_height);
        Ok(hmd)
    }

    fn create_scene(&mut self, gpu: &Gpu<'_>) -> Result<GridScene> {
        Ok(GridScene::new(gpu.device().clone(), gpu.queue().clone(), 10, 1.0))
    }

    fn on_session_ready(&mut self, session: &mut WgpuSession<SimulatedHmd, GridScene>) {
        log::info!(
            "studio ready: eye height {:.3} m, ipd {:.1} mm, panel {}x{}",
            session.eye_height().unwrap_or_default(),
            session.ipd().unwrap_or_default() * 1000.0,
            session.preferred_width(),
            session.preferred_height(),
        );

        // Head yaw, once per eye per frame, at trace level.
        session.add_status_listener(|position: Vec3, orientation: Quat, _projection: &Mat4| {
            let (yaw, pitch, _) = orientation.to_euler(EulerRot::YXZ);
            log::trace!(
                "eye at ({:.3}, {:.3}, {:.3}) yaw {:.1}° pitch {:.1}°",
                position.x,
                position.y,
                position.z,
                yaw.to_degrees(),
                pitch.to_degrees()
            );
        });
    }

    fn on_frame(&mut self, session: &mut WgpuSession<SimulatedHmd, GridScene>) -> AppControl {
        let frame = session.frame_count();
        if frame > 0 && frame % REPORT_EVERY == 0 {
            if let Some(ft) = session.last_frame_time() {
                log::info!(
                    "frame {frame}: {:.1} fps, {} frames submitted",
                    ft.fps(),
                    session.device().frames_submitted()
                );
            }
        }
        AppControl::Continue
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let studio = Studio {
        ipd: 0.064,
        eye_height: 1.675,
    };

    let hmd_config = HmdConfig {
        clear_color: [0.02, 0.02, 0.03, 1.0],
        ..Default::default()
    };

    Runtime::run(
        RuntimeConfig {
            title: "ocular studio".to_string(),
            ..Default::default()
        },
        GpuInit::default(),
        hmd_config,
        studio,
    )
}
