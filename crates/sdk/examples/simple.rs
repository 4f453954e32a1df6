//! Simple SDK Example
//!
//! Demonstrates basic usage of the RulesKit SDK.
//!
//! # Usage
//!
//! 1. Start a rule service listening on `http://127.0.0.1:8000`
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --example simple
//!    ```

use ruleskit_sdk::catalog::BeamingSlopeWithClearance;
use ruleskit_sdk::shapes::{
    BBox, BeamCollisionInput, BeamSegment, BeamingSlopeClearanceInput, StemDirection,
};
use ruleskit_sdk::{ClientConfig, RetryPolicy, RulesKitClient};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("RulesKit SDK - Simple Example");
    println!("=============================\n");

    // 1. Create client
    println!("1. Creating client...");
    let config = ClientConfig::new("http://127.0.0.1:8000").with_timeout(Duration::from_secs(5));
    let client = RulesKitClient::with_config(config)?;
    println!("   ✓ Ready\n");

    // 2. Resolve beam collisions
    println!("2. Resolving beam collisions...");
    let beams = client
        .resolve_beam_collisions(&BeamCollisionInput {
            beam_segments: vec![BeamSegment::new(0.0, 0.0, 10.0, 2.0)],
            nearby_grobs: vec![BBox::new(1.0, 1.0, 2.0, 2.0)],
        })
        .await?;
    println!("   ✓ Offsets: {:?}\n", beams.offsets);

    // 3. Beam slope, retrying transient failures
    println!("3. Computing beam slope (up to 3 attempts)...");
    let policy = RetryPolicy::new(3, Duration::from_millis(200));
    let slope = client
        .invoke_with_retry::<BeamingSlopeWithClearance>(
            &policy,
            &BeamingSlopeClearanceInput {
                note_positions_sp: vec![0.0, 1.0, 2.5],
                stem_directions: vec![StemDirection::Up; 3],
                beam_thickness_sp: 0.5,
                nearby_grobs: None,
            },
        )
        .await?;
    println!("   ✓ Slope: {}", slope.slope_sp_per_space_adjusted);
    if let Some(clearance) = slope.min_clearance_sp {
        println!("   ✓ Min clearance: {} sp", clearance);
    }

    println!("\n✓ Example completed successfully!");

    Ok(())
}
