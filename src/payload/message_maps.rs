//! Message Type Description Table
//!
//! Names and request/response flow for the message ids the decoder knows
//! about. Purely descriptive: nothing here changes how a body is decoded.

use serde::{Deserialize, Serialize};

use crate::constants::{
    JT808_MSG_ADDITIONAL_INFORMATION, JT808_MSG_AUTHENTICATION, JT808_MSG_DEVICE_GENERAL_RESPONSE,
    JT808_MSG_HEARTBEAT, JT808_MSG_LOCATION_REPORT, JT808_MSG_PARAMETER_QUERY,
    JT808_MSG_PARAMETER_QUERY_RESPONSE, JT808_MSG_PARAMETER_SET, JT808_MSG_REGISTRATION,
    JT808_MSG_REGISTRATION_RESPONSE, JT808_MSG_SERVER_GENERAL_RESPONSE,
};

/// Name and flow description of one message id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTypeInfo {
    pub name: String,
    pub flow: String,
}

/// Built-in message descriptions: (id, name, flow).
pub const MESSAGE_ID_INFO: &[(u16, &str, &str)] = &[
    (
        JT808_MSG_REGISTRATION,
        "Device Registration",
        "Device registers before operating; server answers with 0x8100 and returns the authentication code.",
    ),
    (
        JT808_MSG_REGISTRATION_RESPONSE,
        "Device Registration Response",
        "Server response to registration (0x0100) with result and authentication code.",
    ),
    (
        JT808_MSG_AUTHENTICATION,
        "Device Authentication",
        "Device authenticates using the authentication code; server answers 0x8001.",
    ),
    (
        JT808_MSG_SERVER_GENERAL_RESPONSE,
        "Server General Response",
        "Generic server response to messages that require acknowledgement.",
    ),
    (
        JT808_MSG_HEARTBEAT,
        "Device Heartbeat",
        "Device heartbeat; server answers 0x8001 to keep the session online.",
    ),
    (
        JT808_MSG_LOCATION_REPORT,
        "Device Basic Information",
        "Position/sensor data; server answers 0x8001 and stores the raw frame.",
    ),
    (
        JT808_MSG_ADDITIONAL_INFORMATION,
        "Additional Information",
        "Additional sensor data; a response is not required by the protocol.",
    ),
    (
        JT808_MSG_DEVICE_GENERAL_RESPONSE,
        "Device General Query Response",
        "Device response to server queries; no further response required.",
    ),
    (
        JT808_MSG_PARAMETER_SET,
        "Configuration Commands",
        "Server command; device answers with 0x0104 or 0x0001.",
    ),
    (
        JT808_MSG_PARAMETER_QUERY,
        "Query Commands",
        "Server query; device answers with 0x0104.",
    ),
    (
        JT808_MSG_PARAMETER_QUERY_RESPONSE,
        "Device General Configuration Response",
        "Device response carrying the requested parameters.",
    ),
];

/// Builds an owned description from a table row.
pub fn info_from_row(row: &(u16, &'static str, &'static str)) -> (u16, MessageTypeInfo) {
    let (id, name, flow) = *row;
    (
        id,
        MessageTypeInfo {
            name: name.to_string(),
            flow: flow.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_row_has_name_and_flow() {
        for (id, name, flow) in MESSAGE_ID_INFO {
            assert!(!name.is_empty(), "0x{id:04X} has no name");
            assert!(!flow.is_empty(), "0x{id:04X} has no flow");
        }
    }

    #[test]
    fn test_additional_information_is_described() {
        let row = MESSAGE_ID_INFO
            .iter()
            .find(|(id, _, _)| *id == JT808_MSG_ADDITIONAL_INFORMATION)
            .unwrap();
        let (id, info) = info_from_row(row);
        assert_eq!(id, 0x0900);
        assert_eq!(info.name, "Additional Information");
    }
}
