//! Audio domains and target identities.
//!
//! A target is an addressable slot that can receive a custom audio override:
//! an emergency-vehicle type per region (or a specific vehicle prefab), a
//! discovered ambient prefab, or one of the eight fixed transit-announcement
//! slots. Target ids are stable within a session and double as the keys of
//! the persisted `target_selections` map.

use std::fmt;

/// One of the three independent instances of the selection/apply engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Siren,
    Ambient,
    Transit,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Siren, Domain::Ambient, Domain::Transit];

    /// Stable lowercase identifier, used in logs and file-resolver calls.
    pub fn id(&self) -> &'static str {
        match self {
            Domain::Siren => "siren",
            Domain::Ambient => "ambient",
            Domain::Transit => "transit",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Emergency-vehicle service type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleType {
    Police,
    Fire,
    Ambulance,
}

impl VehicleType {
    pub fn id(&self) -> &'static str {
        match self {
            VehicleType::Police => "police",
            VehicleType::Fire => "fire",
            VehicleType::Ambulance => "ambulance",
        }
    }
}

/// Siren region variant carried by vehicle prefabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    NorthAmerica,
    Europe,
}

impl Region {
    pub fn id(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "na",
            Region::Europe => "eu",
        }
    }
}

/// The eight fixed transit-announcement slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitSlot {
    TrainArrival,
    TrainDeparture,
    BusArrival,
    BusDeparture,
    MetroArrival,
    MetroDeparture,
    TramArrival,
    TramDeparture,
}

impl TransitSlot {
    pub const ALL: [TransitSlot; 8] = [
        TransitSlot::TrainArrival,
        TransitSlot::TrainDeparture,
        TransitSlot::BusArrival,
        TransitSlot::BusDeparture,
        TransitSlot::MetroArrival,
        TransitSlot::MetroDeparture,
        TransitSlot::TramArrival,
        TransitSlot::TramDeparture,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            TransitSlot::TrainArrival => "train.arrival",
            TransitSlot::TrainDeparture => "train.departure",
            TransitSlot::BusArrival => "bus.arrival",
            TransitSlot::BusDeparture => "bus.departure",
            TransitSlot::MetroArrival => "metro.arrival",
            TransitSlot::MetroDeparture => "metro.departure",
            TransitSlot::TramArrival => "tram.arrival",
            TransitSlot::TramDeparture => "tram.departure",
        }
    }

    /// Whether a host source name belongs to this slot.
    ///
    /// Matches on mode and event keywords, case-insensitive ("metro" also
    /// accepts "subway" naming).
    pub fn matches_source(&self, prefab_name: &str) -> bool {
        let name = prefab_name.to_lowercase();
        let (modes, event): (&[&str], &str) = match self {
            TransitSlot::TrainArrival => (&["train"], "arrival"),
            TransitSlot::TrainDeparture => (&["train"], "departure"),
            TransitSlot::BusArrival => (&["bus"], "arrival"),
            TransitSlot::BusDeparture => (&["bus"], "departure"),
            TransitSlot::MetroArrival => (&["metro", "subway"], "arrival"),
            TransitSlot::MetroDeparture => (&["metro", "subway"], "departure"),
            TransitSlot::TramArrival => (&["tram"], "arrival"),
            TransitSlot::TramDeparture => (&["tram"], "departure"),
        };
        modes.iter().any(|mode| name.contains(mode)) && name.contains(event)
    }
}

impl fmt::Display for TransitSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Stable identity of an addressable audio slot within a domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetKey {
    /// Emergency-vehicle siren, addressed by service type and region.
    Vehicle(VehicleType, Region),
    /// A specific vehicle prefab's siren override slot.
    VehiclePrefab(String),
    /// A discovered ambient loop prefab.
    AmbientPrefab(String),
    /// One of the fixed transit-announcement slots.
    Transit(TransitSlot),
}

impl TargetKey {
    /// Stable id used for config entries, sorting, and logs.
    ///
    /// Vehicle pairs and transit slots use dotted lowercase ids
    /// (`police.na`, `train.arrival`); prefab targets keep the host's
    /// prefab name verbatim.
    pub fn id(&self) -> String {
        match self {
            TargetKey::Vehicle(vehicle, region) => format!("{}.{}", vehicle.id(), region.id()),
            TargetKey::VehiclePrefab(name) => name.clone(),
            TargetKey::AmbientPrefab(name) => name.clone(),
            TargetKey::Transit(slot) => slot.id().to_string(),
        }
    }

    pub fn domain(&self) -> Domain {
        match self {
            TargetKey::Vehicle(..) | TargetKey::VehiclePrefab(_) => Domain::Siren,
            TargetKey::AmbientPrefab(_) => Domain::Ambient,
            TargetKey::Transit(_) => Domain::Transit,
        }
    }
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}
