//! Lab messages
//!
//! Input and UI talk to the lab through messages rather than touching its
//! resources directly.

use bevy::ecs::message::Message;

/// The user asked the tube to pour into the flask
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PourRequested;

/// Reagents offered by the panel; adding one only logs it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reagent {
    SulfuricAcid,
    SodiumHydroxide,
    Salt,
}

impl Reagent {
    pub const ALL: [Reagent; 3] = [Reagent::SulfuricAcid, Reagent::SodiumHydroxide, Reagent::Salt];

    /// Chemical formula or common name shown on the button
    pub fn formula(self) -> &'static str {
        match self {
            Reagent::SulfuricAcid => "H₂SO₄",
            Reagent::SodiumHydroxide => "NaOH",
            Reagent::Salt => "Salt",
        }
    }
}

/// A reagent button was pressed
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReagentAdded(pub Reagent);
