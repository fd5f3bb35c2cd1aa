//! Generates the dispatcher and group records for a small UBX schema.
//!
//! Run with: cargo run --example generate -- <output-dir>
//!
//! Without an argument the artifacts are printed to stdout.

use std::path::PathBuf;
use ubxgen::prelude::*;

fn schema() -> Schema {
    Schema::new("UBX")
        .with_description("u-blox binary protocol subset")
        .with_group(
            GroupDef::new("NAV", 0x01)
                .with_description("Navigation Results")
                .with_message(
                    MessageDef::new("POSLLH", 0x02)
                        .with_description("Geodetic Position Solution")
                        .scalar("iTOW", 0, PrimitiveType::U4)
                        .scalar("lon", 1, PrimitiveType::I4)
                        .scalar("lat", 2, PrimitiveType::I4)
                        .scalar("height", 3, PrimitiveType::I4)
                        .scalar("hMSL", 4, PrimitiveType::I4)
                        .scalar("hAcc", 5, PrimitiveType::U4)
                        .scalar("vAcc", 6, PrimitiveType::U4),
                )
                .with_message(
                    MessageDef::new("SVINFO", 0x30)
                        .with_description("Space Vehicle Information")
                        .scalar("iTOW", 0, PrimitiveType::U4)
                        .scalar("numCh", 1, PrimitiveType::U1)
                        .scalar("globalFlags", 2, PrimitiveType::X1)
                        .array("reserved2", 3, PrimitiveType::U1, 2)
                        .repeated(vec![
                            FieldDef::scalar("chn", 0, PrimitiveType::U1),
                            FieldDef::scalar("svid", 1, PrimitiveType::U1),
                            FieldDef::scalar("flags", 2, PrimitiveType::X1),
                            FieldDef::scalar("quality", 3, PrimitiveType::X1),
                            FieldDef::scalar("cno", 4, PrimitiveType::U1),
                            FieldDef::scalar("elev", 5, PrimitiveType::I1),
                            FieldDef::scalar("azim", 6, PrimitiveType::I2),
                            FieldDef::scalar("prRes", 7, PrimitiveType::I4),
                        ]),
                ),
        )
        .with_group(
            GroupDef::new("ACK", 0x05)
                .with_message(
                    MessageDef::new("ACK", 0x01)
                        .scalar("clsID", 0, PrimitiveType::U1)
                        .scalar("msgID", 1, PrimitiveType::U1),
                )
                .with_message(
                    MessageDef::new("NAK", 0x00)
                        .scalar("clsID", 0, PrimitiveType::U1)
                        .scalar("msgID", 1, PrimitiveType::U1),
                ),
        )
}

fn main() -> Result<(), CodegenError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let artifacts = generate(&schema())?;

    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(dir) => {
            let written = artifacts.write_to(&dir)?;
            tracing::info!(files = written.len(), dir = %dir.display(), "done");
        }
        None => {
            for artifact in artifacts.iter() {
                println!("{}", artifact.contents);
            }
        }
    }

    Ok(())
}
