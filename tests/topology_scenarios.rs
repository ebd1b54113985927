#[cfg(test)]
mod topology_scenarios {
    use std::path::Path;

    use netdevmgr::config_loader::load_config;
    use netdevmgr::ip::AddressAllocator;
    use netdevmgr::orchestrator::{allocator_for, build_topology, validator_for};
    use netdevmgr::report::render_graph;
    use netdevmgr::topology::{Device, DeviceId, DeviceKind, Membership, Subnet, Topology, Vlan, Zone};
    use netdevmgr::utils::validation::{Validator, ValidatorOptions, ViolationKind};

    /// A topology with one registered subnet, VLAN and zone
    struct Lab {
        topology: Topology,
        allocator: AddressAllocator,
        membership: Membership,
    }

    impl Lab {
        fn new() -> Self {
            let subnet: Subnet = "192.168.1.0/24".parse().unwrap();
            let vlan = Vlan::new("V");
            let zone = Zone::new("Z");
            let mut topology = Topology::new();
            topology.add_subnet(subnet.clone());
            topology.add_vlan(vlan.clone());
            topology.add_zone(zone.clone());
            Self {
                topology,
                allocator: AddressAllocator::from_seed(2024),
                membership: Membership::new(subnet, vlan, zone),
            }
        }

        fn add(&mut self, name: &str) -> DeviceId {
            let membership = self.membership.clone();
            self.add_with(name, membership)
        }

        fn add_with(&mut self, name: &str, membership: Membership) -> DeviceId {
            let device = Device::new(name, DeviceKind::Pc, membership, &mut self.allocator);
            self.topology.add_device(device)
        }

        fn connected(&self, a: DeviceId, b: DeviceId) -> bool {
            self.topology.device(a).map_or(false, |d| d.is_connected_to(b))
        }
    }

    #[test]
    fn test_connect_is_symmetric() {
        let mut lab = Lab::new();
        let a = lab.add("A");
        let b = lab.add("B");

        lab.topology.connect_devices(a, b).unwrap();
        assert!(lab.connected(a, b));
        assert!(lab.connected(b, a));
    }

    #[test]
    fn test_disconnect_after_connect() {
        let mut lab = Lab::new();
        let a = lab.add("A");
        let b = lab.add("B");

        lab.topology.connect_devices(a, b).unwrap();
        lab.topology.disconnect_devices(a, b).unwrap();
        assert!(!lab.connected(a, b));
        assert!(!lab.connected(b, a));

        // Disconnecting again is a no-op
        lab.topology.disconnect_devices(b, a).unwrap();
        assert!(lab.topology.edges().is_empty());
    }

    #[test]
    fn test_remove_device_leaves_no_dangling_edges() {
        let mut lab = Lab::new();
        let ids: Vec<_> = ["A", "B", "C", "D"].iter().map(|n| lab.add(n)).collect();
        for &other in &ids[1..] {
            lab.topology.connect_devices(ids[0], other).unwrap();
        }
        lab.topology.connect_devices(ids[2], ids[3]).unwrap();

        assert!(lab.topology.remove_device(ids[0]).is_some());
        assert!(lab.topology.devices().iter().all(|d| d.id() != ids[0]));
        assert!(lab.topology.devices().iter().all(|d| !d.is_connected_to(ids[0])));
        assert_eq!(lab.topology.edges(), vec![(ids[2], ids[3])]);
    }

    #[test]
    fn test_connect_twice_creates_one_edge() {
        let mut lab = Lab::new();
        let a = lab.add("A");
        let b = lab.add("B");

        lab.topology.connect_devices(a, b).unwrap();
        lab.topology.connect_devices(a, b).unwrap();

        let device = lab.topology.device(a).unwrap();
        assert_eq!(device.connections().collect::<Vec<_>>(), vec![b]);
        assert_eq!(lab.topology.edges().len(), 1);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let mut lab = Lab::new();
        let a = lab.add("A");
        let b = lab.add("B");
        let c = lab.add("C");
        lab.topology.connect_devices(b, a).unwrap();
        lab.topology.connect_devices(b, c).unwrap();
        lab.topology.connect_devices(c, c).unwrap();

        let first = lab.topology.validate();
        for _ in 0..5 {
            assert_eq!(lab.topology.validate(), first);
        }
        assert_eq!(first.unwrap_err().kind, ViolationKind::VlanFanOutViolation);
    }

    /// Scenario 1: two fully registered devices connected to each other
    #[test]
    fn test_valid_pair_passes() {
        let mut lab = Lab::new();
        let d1 = lab.add("D1");
        let d2 = lab.add("D2");
        lab.topology.connect_devices(d1, d2).unwrap();

        assert!(lab.topology.validate().is_ok());
    }

    /// Scenario 2: a device in a subnet that was never registered
    #[test]
    fn test_unregistered_subnet() {
        let mut lab = Lab::new();
        lab.add("D1");
        let stray: Subnet = "192.168.1.0/24".parse().unwrap();
        let membership = Membership {
            subnet: Some(stray),
            ..lab.membership.clone()
        };
        let d = lab.add_with("D", membership);

        let violation = lab.topology.validate().unwrap_err();
        assert_eq!(violation.kind, ViolationKind::UnknownSubnet);
        assert_eq!(violation.device, d);
        assert_eq!(violation.device_name, "D");
    }

    /// Scenario 3: two otherwise valid devices sharing a name
    #[test]
    fn test_duplicate_name() {
        let mut lab = Lab::new();
        lab.add("PC1");
        lab.add("PC1");

        let violation = lab.topology.validate().unwrap_err();
        assert_eq!(violation.kind, ViolationKind::DuplicateName);
        assert_eq!(violation.detail, "Duplicate device name found - PC1.");
    }

    /// Scenario 4: a device connected to itself
    #[test]
    fn test_self_connection() {
        let mut lab = Lab::new();
        let d = lab.add("D");
        lab.topology.connect_devices(d, d).unwrap();

        let violation = lab.topology.validate().unwrap_err();
        assert_eq!(violation.kind, ViolationKind::SelfConnection);
        assert_eq!(violation.device, d);
    }

    /// Scenario 5: a device with two direct neighbors in its own VLAN
    #[test]
    fn test_vlan_fan_out() {
        let mut lab = Lab::new();
        let d = lab.add("D");
        let d2 = lab.add("D2");
        let d3 = lab.add("D3");
        lab.topology.connect_devices(d, d2).unwrap();
        lab.topology.connect_devices(d, d3).unwrap();

        let violation = lab.topology.validate().unwrap_err();
        assert_eq!(violation.kind, ViolationKind::VlanFanOutViolation);
        assert_eq!(violation.device, d);
    }

    /// Scenario 6: looking up a missing device is not an error
    #[test]
    fn test_missing_device_lookup() {
        let lab = Lab::new();
        assert!(lab.topology.device_by_name("NoSuchDevice").is_none());
        assert!(Topology::new().device_by_name("NoSuchDevice").is_none());
    }

    /// Behavior change: a device without a VLAN is only exempt from the
    /// VLAN checks. Previously such a device skipped every check.
    #[test]
    fn test_missing_vlan_no_longer_skips_other_checks() {
        let mut lab = Lab::new();
        let stray: Subnet = "10.0.0.0/24".parse().unwrap();
        let d = lab.add_with(
            "Router1",
            Membership {
                subnet: Some(stray),
                vlan: None,
                zone: lab.membership.zone.clone(),
            },
        );
        lab.topology.connect_devices(d, d).unwrap();

        let violation = lab.topology.validate().unwrap_err();
        assert_eq!(violation.kind, ViolationKind::UnknownSubnet);

        let legacy = Validator::new(ValidatorOptions {
            legacy_vlan_exemption: true,
            ..ValidatorOptions::default()
        });
        assert!(legacy.validate(&lab.topology).is_ok());
    }

    #[test]
    fn test_demo_scenario_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/demo.yaml");
        let config = load_config(&path).unwrap();
        let topology = build_topology(&config, &mut allocator_for(&config, None)).unwrap();

        assert!(validator_for(&config).validate(&topology).is_ok());

        let graph = render_graph(&topology);
        assert!(graph.contains("Subnet 192.168.1.0/24 Devices:"));
        assert!(graph.contains("Switch1 is connected to:\n   PC1\n   PC2\n   Router1"));
        assert!(graph.contains("RPi1 is connected to:\n   Router1"));
    }
}
