use anyhow::Result;
use futium::{app, Variant};

fn main() -> Result<()> {
    app::launch(Variant::ClearOnly)
}
