//! Per-CPU interrupt controllers.
//!
//! Every CPU model names the interrupt controller type it needs. The controller is created as
//! a child of the CPU, referenced through the CPU's `interrupts` parameter, and its ports are
//! all bus-mediated onto the system bus (programmed I/O and interrupt responses on the memory
//! side, interrupt requests on the CPU side).

use super::topology::Topology;
use crate::common::TopologyError;
use crate::component::{ComponentId, Endpoint, PortRef};
use crate::params::Overrides;

impl Topology {
    /// Creates the interrupt controller of `cpu`, or returns the existing one.
    ///
    /// # Returns
    ///
    /// The controller's id. `TypeMismatch` if `cpu` is not a CPU model.
    pub fn create_interrupt_controller(
        &mut self,
        cpu: ComponentId,
    ) -> Result<ComponentId, TopologyError> {
        let component = self.component(cpu)?;
        if let Some(existing) = component.params().component("interrupts") {
            return Ok(existing);
        }
        let Some(traits) = component.component_type().cpu_traits() else {
            return Err(TopologyError::TypeMismatch {
                component: component.path().to_string(),
                param: "interrupts".to_string(),
                expected: "CPU model".to_string(),
                found: component.component_type().name.to_string(),
            });
        };

        let controller = self.add_child(cpu, "interrupts", traits.interrupts, Overrides::new())?;
        self.set_param(cpu, "interrupts", controller)?;
        Ok(controller)
    }

    /// Connects every port of an interrupt controller to `membus`.
    ///
    /// Each port lands on the bus array with the complementary role, which for an x86 local
    /// APIC gives `pio` and `int_responder` on the memory side and `int_requestor` on the CPU
    /// side.
    pub fn connect_interrupts(
        &mut self,
        controller: ComponentId,
        membus: ComponentId,
    ) -> Result<(), TopologyError> {
        let ports: Vec<PortRef> = self
            .component(controller)?
            .ports()
            .map(|(decl, _)| PortRef {
                component: controller,
                port: decl.name,
            })
            .collect();
        for port in ports {
            self.connect(port, Endpoint::Bus(membus))?;
        }
        tracing::debug!(controller = %self.path_of(controller), "interrupt controller wired");
        Ok(())
    }
}
