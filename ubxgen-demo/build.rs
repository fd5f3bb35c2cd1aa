//! Generates the UBX records and dispatcher into `OUT_DIR`.

use std::env;
use std::path::PathBuf;
use ubxgen_codegen::{CodegenConfig, IncludeStyle};
use ubxgen_schema::{FieldDef, GroupDef, MessageDef, PrimitiveType, Schema};

fn schema() -> Schema {
    Schema::new("UBX")
        .with_description("u-blox binary protocol subset")
        .with_group(
            GroupDef::new("NAV", 0x01)
                .with_description("Navigation Results")
                .with_message(
                    // Declared out of order; the record follows the ordinals.
                    MessageDef::new("POSLLH", 0x02)
                        .with_description("Geodetic Position Solution\nlon and lat in 1e-7 deg")
                        .scalar("lat", 1, PrimitiveType::I4)
                        .scalar("lon", 0, PrimitiveType::I4),
                )
                .with_message(
                    MessageDef::new("SVINFO", 0x30)
                        .with_description("Space Vehicle Information")
                        .scalar("iTOW", 0, PrimitiveType::U4)
                        .scalar("numCh", 1, PrimitiveType::U1)
                        .repeated(vec![
                            FieldDef::scalar("chn", 0, PrimitiveType::U1),
                            FieldDef::scalar("svid", 1, PrimitiveType::U1),
                            FieldDef::scalar("flags", 2, PrimitiveType::X1),
                            FieldDef::scalar("quality", 3, PrimitiveType::X1),
                            FieldDef::scalar("cno", 4, PrimitiveType::U1),
                            FieldDef::scalar("elev", 5, PrimitiveType::I1),
                            FieldDef::scalar("azim", 6, PrimitiveType::I2),
                        ]),
                ),
        )
        .with_group(GroupDef::new("INF", 0x04).with_description("Information Messages"))
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
        .with_group(
            GroupDef::new("MON", 0x0A).with_message(
                MessageDef::new("VER", 0x04)
                    .with_description("Receiver/Software Version")
                    .array("swVersion", 0, PrimitiveType::CH, 30)
                    .array("hwVersion", 1, PrimitiveType::CH, 10)
                    .repeated(vec![FieldDef::array("extension", 0, PrimitiveType::CH, 30)]),
            ),
        )
        .with_group(
            GroupDef::new("PM2", 0x41).with_message(
                MessageDef::new("PM2", 0x01)
                    .scalar("version", 0, PrimitiveType::U1)
                    .scalar("maxStartupStateDur", 1, PrimitiveType::U1)
                    .scalar("updatePeriod", 2, PrimitiveType::U4),
            ),
        )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let config = CodegenConfig::new().include_style(IncludeStyle::OutDir);
    ubxgen_codegen::generate_into(&schema(), &config, &out_dir)?;
    Ok(())
}
