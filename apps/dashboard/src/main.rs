//! # Fluir Dashboard
//!
//! Console entry point. See the library crate for the module layout.

#[tokio::main]
async fn main() {
    fluir_dashboard::run().await;
}
