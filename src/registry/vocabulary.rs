// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Event type vocabulary.
//!
//! The standard vocabulary lists the MTConnect Event data item types as
//! `(type identifier, element name)` pairs. The element name is the external
//! field name of the VALUE bucket; DATA_SET and TABLE buckets append
//! `DataSet` and `Table`.
//!
//! Additional types (for example from a newer standard version) are merged
//! in through configuration.

use serde::{Deserialize, Serialize};

use crate::core::Representation;

/// MTConnect Event types, sorted by element name.
const STANDARD_EVENTS: &[(&str, &str)] = &[
    ("ACTIVATION_COUNT", "ActivationCount"),
    ("ACTIVE_AXES", "ActiveAxes"),
    ("ACTIVE_POWER_SOURCE", "ActivePowerSource"),
    ("ACTUATOR_STATE", "ActuatorState"),
    ("ADAPTER_SOFTWARE_VERSION", "AdapterSoftwareVersion"),
    ("ADAPTER_URI", "AdapterURI"),
    ("ALARM", "Alarm"),
    ("ALARM_LIMIT", "AlarmLimit"),
    ("ALARM_LIMITS", "AlarmLimits"),
    ("APPLICATION", "Application"),
    ("ASSET_CHANGED", "AssetChanged"),
    ("ASSET_COUNT", "AssetCount"),
    ("ASSET_REMOVED", "AssetRemoved"),
    ("AVAILABILITY", "Availability"),
    ("AXIS_COUPLING", "AxisCoupling"),
    ("AXIS_FEEDRATE_OVERRIDE", "AxisFeedrateOverride"),
    ("AXIS_INTERLOCK", "AxisInterlock"),
    ("AXIS_STATE", "AxisState"),
    ("BATTERY_STATE", "BatteryState"),
    ("BINDING_STATE", "BindingState"),
    ("BLOCK", "Block"),
    ("BLOCK_COUNT", "BlockCount"),
    ("CHARACTERISTIC_PERSISTENT_ID", "CharacteristicPersistentId"),
    ("CHARACTERISTIC_STATUS", "CharacteristicStatus"),
    ("CHUCK_INTERLOCK", "ChuckInterlock"),
    ("CHUCK_STATE", "ChuckState"),
    ("CLOCK_TIME", "ClockTime"),
    ("CODE", "Code"),
    ("COMPONENT_DATA", "ComponentData"),
    ("COMPOSITION_STATE", "CompositionState"),
    ("CONNECTION_STATUS", "ConnectionStatus"),
    ("CONTROL_LIMIT", "ControlLimit"),
    ("CONTROL_LIMITS", "ControlLimits"),
    ("CONTROLLER_MODE", "ControllerMode"),
    ("CONTROLLER_MODE_OVERRIDE", "ControllerModeOverride"),
    ("COUPLED_AXES", "CoupledAxes"),
    ("CYCLE_COUNT", "CycleCount"),
    ("DATE_CODE", "DateCode"),
    ("DEACTIVATION_COUNT", "DeactivationCount"),
    ("DEVICE_ADDED", "DeviceAdded"),
    ("DEVICE_CHANGED", "DeviceChanged"),
    ("DEVICE_REMOVED", "DeviceRemoved"),
    ("DEVICE_UUID", "DeviceUuid"),
    ("DIRECTION", "Direction"),
    ("DOOR_STATE", "DoorState"),
    ("EMERGENCY_STOP", "EmergencyStop"),
    ("END_OF_BAR", "EndOfBar"),
    ("EQUIPMENT_MODE", "EquipmentMode"),
    ("EXECUTION", "Execution"),
    ("FEATURE_MEASUREMENT", "FeatureMeasurement"),
    ("FEATURE_PERSISTENT_ID", "FeaturePersistentId"),
    ("FIRMWARE_VERSION", "FirmwareVersion"),
    ("FIXTURE_ID", "FixtureId"),
    ("FUNCTIONAL_MODE", "FunctionalMode"),
    ("HARDNESS", "Hardness"),
    ("HOST_NAME", "HostName"),
    ("LEAK_DETECT", "LeakDetect"),
    ("LIBRARY", "Library"),
    ("LINE", "Line"),
    ("LINE_LABEL", "LineLabel"),
    ("LINE_NUMBER", "LineNumber"),
    ("LOAD_COUNT", "LoadCount"),
    ("LOCATION_ADDRESS", "LocationAddress"),
    ("LOCATION_NARRATIVE", "LocationNarrative"),
    ("LOCATION_SPATIAL_GEOGRAPHIC", "LocationSpatialGeographic"),
    ("LOCK_STATE", "LockState"),
    ("MTCONNECT_VERSION", "MTConnectVersion"),
    ("MAINTENANCE_LIST", "MaintenanceList"),
    ("MATERIAL", "Material"),
    ("MATERIAL_LAYER", "MaterialLayer"),
    ("MEASUREMENT_TYPE", "MeasurementType"),
    ("MEASUREMENT_UNITS", "MeasurementUnits"),
    ("MEASUREMENT_VALUE", "MeasurementValue"),
    ("MESSAGE", "Message"),
    ("NETWORK", "Network"),
    ("NETWORK_PORT", "NetworkPort"),
    ("OPERATING_MODE", "OperatingMode"),
    ("OPERATING_SYSTEM", "OperatingSystem"),
    ("OPERATOR_ID", "OperatorId"),
    ("PALLET_ID", "PalletId"),
    ("PART_COUNT", "PartCount"),
    ("PART_COUNT_TYPE", "PartCountType"),
    ("PART_DETECT", "PartDetect"),
    ("PART_GROUP_ID", "PartGroupId"),
    ("PART_ID", "PartId"),
    ("PART_INDEX", "PartIndex"),
    ("PART_KIND_ID", "PartKindId"),
    ("PART_NUMBER", "PartNumber"),
    ("PART_PROCESSING_STATE", "PartProcessingState"),
    ("PART_STATUS", "PartStatus"),
    ("PART_UNIQUE_ID", "PartUniqueId"),
    ("PATH_FEEDRATE_OVERRIDE", "PathFeedrateOverride"),
    ("PATH_MODE", "PathMode"),
    ("POWER_STATE", "PowerState"),
    ("POWER_STATUS", "PowerStatus"),
    ("PROCESS_AGGREGATE_ID", "ProcessAggregateId"),
    ("PROCESS_KIND_ID", "ProcessKindId"),
    ("PROCESS_OCCURRENCE_ID", "ProcessOccurrenceId"),
    ("PROCESS_STATE", "ProcessState"),
    ("PROCESS_TIME", "ProcessTime"),
    ("PROGRAM", "Program"),
    ("PROGRAM_COMMENT", "ProgramComment"),
    ("PROGRAM_EDIT", "ProgramEdit"),
    ("PROGRAM_EDIT_NAME", "ProgramEditName"),
    ("PROGRAM_HEADER", "ProgramHeader"),
    ("PROGRAM_LOCATION", "ProgramLocation"),
    ("PROGRAM_LOCATION_TYPE", "ProgramLocationType"),
    ("PROGRAM_NEST_LEVEL", "ProgramNestLevel"),
    ("ROTARY_MODE", "RotaryMode"),
    ("ROTARY_VELOCITY_OVERRIDE", "RotaryVelocityOverride"),
    ("ROTATION", "Rotation"),
    ("SENSOR_ATTACHMENT", "SensorAttachment"),
    ("SENSOR_STATE", "SensorState"),
    ("SERIAL_NUMBER", "SerialNumber"),
    ("SPECIFICATION_LIMIT", "SpecificationLimit"),
    ("SPECIFICATION_LIMITS", "SpecificationLimits"),
    ("SPINDLE_INTERLOCK", "SpindleInterlock"),
    ("THREAD", "Thread"),
    ("TOOL_ASSET_ID", "ToolAssetId"),
    ("TOOL_CUTTING_ITEM", "ToolCuttingItem"),
    ("TOOL_GROUP", "ToolGroup"),
    ("TOOL_ID", "ToolId"),
    ("TOOL_NUMBER", "ToolNumber"),
    ("TOOL_OFFSET", "ToolOffset"),
    ("TOOL_OFFSETS", "ToolOffsets"),
    ("TRANSFER_COUNT", "TransferCount"),
    ("TRANSLATION", "Translation"),
    ("UNCERTAINTY", "Uncertainty"),
    ("UNCERTAINTY_TYPE", "UncertaintyType"),
    ("UNLOAD_COUNT", "UnloadCount"),
    ("USER", "User"),
    ("VALVE_STATE", "ValveState"),
    ("VARIABLE", "Variable"),
    ("WAIT_STATE", "WaitState"),
    ("WIRE", "Wire"),
    ("WORK_OFFSET", "WorkOffset"),
    ("WORK_OFFSETS", "WorkOffsets"),
    ("WORKHOLDING_ID", "WorkholdingId"),
];

/// One event type and the representations it is projected in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    /// Type identifier as it appears on observations (e.g. "TOOL_ID")
    pub id: String,
    /// Element name; base of the bucket names (e.g. "ToolId")
    pub name: String,
    /// Representations to declare, in bucket order
    #[serde(default = "all_representations")]
    pub representations: Vec<Representation>,
}

fn all_representations() -> Vec<Representation> {
    Representation::ALL.to_vec()
}

impl EventType {
    /// Create a type declared in all three representations.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            representations: all_representations(),
        }
    }

    /// Create a type whose element name is derived from its identifier.
    pub fn from_id(id: impl Into<String>) -> Self {
        let id = id.into();
        let name = element_name(&id);
        Self::new(id, name)
    }

    /// Restrict the declared representations.
    pub fn with_representations(mut self, representations: &[Representation]) -> Self {
        self.representations = representations.to_vec();
        self
    }

    /// Bucket name for one representation of this type.
    pub fn bucket_name(&self, representation: Representation) -> String {
        representation.bucket_name(&self.name)
    }
}

/// Derive an element name from an upper-snake type identifier.
///
/// `"CONTROLLER_MODE"` becomes `"ControllerMode"`.
pub fn element_name(type_id: &str) -> String {
    type_id
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let lower = part.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Ordered list of event types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    types: Vec<EventType>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self { types: Vec::new() }
    }

    /// The built-in MTConnect Event vocabulary.
    pub fn standard() -> Self {
        Self {
            types: STANDARD_EVENTS
                .iter()
                .map(|(id, name)| EventType::new(*id, *name))
                .collect(),
        }
    }

    /// Append a type.
    pub fn push(&mut self, event_type: EventType) {
        self.types.push(event_type);
    }

    /// Look up a type by identifier.
    pub fn get(&self, id: &str) -> Option<&EventType> {
        self.types.iter().find(|t| t.id == id)
    }

    /// Iterate over types in their current order.
    pub fn iter(&self) -> impl Iterator<Item = &EventType> {
        self.types.iter()
    }

    /// Number of types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Sort types by element name. The sort is stable, so equal names keep
    /// their relative order and are caught as duplicates at registration.
    pub fn sort_by_name(&mut self) {
        self.types.sort_by(|a, b| a.name.cmp(&b.name));
    }
}

impl Extend<EventType> for Vocabulary {
    fn extend<I: IntoIterator<Item = EventType>>(&mut self, iter: I) {
        self.types.extend(iter);
    }
}

impl FromIterator<EventType> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = EventType>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}
