//! Device command handlers.
//!
//! Devices are opaque server records: only `dev_id` is interpreted, and
//! the table view picks out a few well-known attributes for display.

use serde_json::Value;
use tabled::Tabled;
use ttnkit_core::{Device, Operation};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{Session, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Device ID")]
    dev_id: String,
    #[tabled(rename = "DevEUI")]
    dev_eui: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            dev_id: output::or_dash(d.dev_id.as_deref()),
            dev_eui: output::or_dash(d.attribute_str("dev_eui")),
            description: output::or_dash(d.attribute_str("description")),
        }
    }
}

fn detail(d: &Device) -> String {
    let mut lines = vec![format!("Device ID: {}", output::or_dash(d.dev_id.as_deref()))];
    for (key, value) in &d.attributes {
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        lines.push(format!("{key}: {value}"));
    }
    lines.join("\n")
}

fn device_id(d: &Device) -> String {
    d.dev_id.clone().unwrap_or_default()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List { app } => {
            let app = util::resolve_app(session, &app).await?;
            if !app.has_handler() && !global.quiet {
                eprintln!("Application '{}' has no handler registered", app.id);
            }
            let devices = util::confirmed(
                session.client.list_devices(&app).await,
                Operation::ListDevices,
                &app.id,
            )?;
            let out = output::render_list(
                &global.output,
                &devices,
                |d| DeviceRow::from(d),
                device_id,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { app, device } => {
            let app = util::resolve_app(session, &app).await?;
            let found = util::confirmed(
                session.client.get_device(&app, &device).await,
                Operation::GetDevice,
                &app.id,
            )?;
            let out = output::render_single(&global.output, &found, detail, device_id);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Add { app, from_file } => {
            let app = util::resolve_app(session, &app).await?;
            let device: Device = util::read_json_file(&from_file)?;
            util::confirmed(
                session.client.add_device(&app, &device).await,
                Operation::AddDevice,
                &app.id,
            )?;
            output::success(
                global,
                &format!(
                    "Device '{}' added to '{}'",
                    output::or_dash(device.dev_id.as_deref()),
                    app.id
                ),
            );
            Ok(())
        }

        DevicesCommand::Update {
            app,
            device,
            from_file,
        } => {
            let app = util::resolve_app(session, &app).await?;
            let patch: Device = util::read_json_file(&from_file)?;
            let updated = util::confirmed(
                session.client.update_device(&app, &device, &patch).await,
                Operation::UpdateDevice,
                &app.id,
            )?;
            output::success(global, &format!("Device '{device}' updated"));
            let out = output::render_single(&global.output, &updated, detail, device_id);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Delete { app, device } => {
            let app = util::resolve_app(session, &app).await?;
            if !util::confirm(
                &format!("Delete device {device} from {}?", app.id),
                global.yes,
            )? {
                return Ok(());
            }
            util::confirmed(
                session
                    .client
                    .delete_device(&app, &Device::new(device.as_str()))
                    .await,
                Operation::DeleteDevice,
                &app.id,
            )?;
            output::success(global, &format!("Device '{device}' deleted"));
            Ok(())
        }
    }
}
