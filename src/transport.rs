//! Interconnect transport model
//!
//! Each supported interconnect is described by a fixed per-message latency and a
//! peak bandwidth. The values are simulation ground truth: they are defined once
//! in [`TransportRegistry::standard`] and cannot be changed afterwards.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Supported GPU-to-GPU interconnects, in canonical reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    /// PCI Express 5.0 host path
    PcieGen5,
    /// NVLink 4.0 via NVSwitch
    Nvlink4,
    /// InfiniBand NIC without GPU bypass
    IbNic,
    /// InfiniBand with GPUDirect RDMA
    GpudirectRdma,
}

impl Transport {
    /// Every transport, in the order runs are reported
    pub const ALL: [Transport; 4] = [
        Transport::PcieGen5,
        Transport::Nvlink4,
        Transport::IbNic,
        Transport::GpudirectRdma,
    ];

    /// Identifier used on the command line and in output
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::PcieGen5 => "pcie_gen5",
            Transport::Nvlink4 => "nvlink4",
            Transport::IbNic => "ib_nic",
            Transport::GpudirectRdma => "gpudirect_rdma",
        }
    }

    /// All identifiers, in canonical order
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Transport::as_str).collect()
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transport {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|transport| transport.as_str() == s)
            .ok_or_else(|| AppError::unknown_transport(s))
    }
}

/// Latency and bandwidth characteristics of one transport
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransportProfile {
    transport: Transport,
    fixed_latency_seconds: f64,
    peak_bandwidth_gbps: f64,
}

impl TransportProfile {
    // Only the registry builds profiles
    const fn new(transport: Transport, fixed_latency_seconds: f64, peak_bandwidth_gbps: f64) -> Self {
        Self {
            transport,
            fixed_latency_seconds,
            peak_bandwidth_gbps,
        }
    }

    /// Arbitrary characteristics for exercising the cost model
    #[cfg(test)]
    pub(crate) fn custom(fixed_latency_seconds: f64, peak_bandwidth_gbps: f64) -> Self {
        Self::new(Transport::PcieGen5, fixed_latency_seconds, peak_bandwidth_gbps)
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    /// Constant per-transfer overhead in seconds
    pub fn fixed_latency_seconds(&self) -> f64 {
        self.fixed_latency_seconds
    }

    /// Peak sustained bandwidth in GB/s
    pub fn peak_bandwidth_gbps(&self) -> f64 {
        self.peak_bandwidth_gbps
    }
}

/// Ground-truth profile table
const STANDARD_PROFILES: [TransportProfile; 4] = [
    TransportProfile::new(Transport::PcieGen5, 0.6e-6, 64.0),
    TransportProfile::new(Transport::Nvlink4, 0.05e-6, 900.0),
    TransportProfile::new(Transport::IbNic, 1.0e-6, 400.0),
    TransportProfile::new(Transport::GpudirectRdma, 0.2e-6, 400.0),
];

/// Read-only lookup table from transport to profile
///
/// Built once at startup and shared behind an `Arc`; there is no way to
/// mutate a registry after construction.
#[derive(Debug, Clone)]
pub struct TransportRegistry {
    profiles: HashMap<Transport, TransportProfile>,
}

impl TransportRegistry {
    /// Registry with the standard interconnect constants
    pub fn standard() -> Self {
        Self {
            profiles: STANDARD_PROFILES
                .iter()
                .map(|profile| (profile.transport, *profile))
                .collect(),
        }
    }

    /// Resolve a transport identifier to its profile
    pub fn lookup(&self, name: &str) -> Result<TransportProfile> {
        let transport = Transport::from_str(name)?;
        self.profile(transport)
    }

    /// Profile for an already-parsed transport
    pub fn profile(&self, transport: Transport) -> Result<TransportProfile> {
        self.profiles
            .get(&transport)
            .copied()
            .ok_or_else(|| AppError::unknown_transport(transport.as_str()))
    }

    /// Profiles in canonical order
    pub fn profiles(&self) -> Vec<TransportProfile> {
        Transport::ALL
            .iter()
            .filter_map(|transport| self.profiles.get(transport).copied())
            .collect()
    }
}

impl Default for TransportRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_all_transports() {
        let registry = TransportRegistry::standard();
        for name in Transport::names() {
            let profile = registry.lookup(name).unwrap();
            assert_eq!(profile.transport().as_str(), name);
            assert!(profile.fixed_latency_seconds() > 0.0);
            assert!(profile.peak_bandwidth_gbps() > 0.0);
        }
    }

    #[test]
    fn test_standard_constants() {
        let registry = TransportRegistry::standard();

        let nvlink = registry.lookup("nvlink4").unwrap();
        assert_eq!(nvlink.fixed_latency_seconds(), 0.05e-6);
        assert_eq!(nvlink.peak_bandwidth_gbps(), 900.0);

        let pcie = registry.lookup("pcie_gen5").unwrap();
        assert_eq!(pcie.fixed_latency_seconds(), 0.6e-6);
        assert_eq!(pcie.peak_bandwidth_gbps(), 64.0);

        let ib = registry.lookup("ib_nic").unwrap();
        assert_eq!(ib.fixed_latency_seconds(), 1.0e-6);
        assert_eq!(ib.peak_bandwidth_gbps(), 400.0);

        let rdma = registry.lookup("gpudirect_rdma").unwrap();
        assert_eq!(rdma.fixed_latency_seconds(), 0.2e-6);
        assert_eq!(rdma.peak_bandwidth_gbps(), 400.0);
    }

    #[test]
    fn test_unknown_transport() {
        let registry = TransportRegistry::standard();
        let err = registry.lookup("usb4").unwrap_err();
        assert!(matches!(err, AppError::UnknownTransport(ref name) if name == "usb4"));

        // Identifiers are case sensitive
        assert!(registry.lookup("NVLINK4").is_err());
        assert!(registry.lookup("").is_err());
    }

    #[test]
    fn test_canonical_order() {
        assert_eq!(
            Transport::names(),
            vec!["pcie_gen5", "nvlink4", "ib_nic", "gpudirect_rdma"]
        );

        let registry = TransportRegistry::standard();
        let ordered: Vec<Transport> = registry.profiles().iter().map(|p| p.transport()).collect();
        assert_eq!(ordered, Transport::ALL.to_vec());
    }

    #[test]
    fn test_display_round_trip() {
        for transport in Transport::ALL {
            assert_eq!(transport.to_string().parse::<Transport>().unwrap(), transport);
        }
    }

    #[test]
    fn test_serde_uses_identifiers() {
        let json = serde_json::to_string(&Transport::GpudirectRdma).unwrap();
        assert_eq!(json, "\"gpudirect_rdma\"");
    }
}
