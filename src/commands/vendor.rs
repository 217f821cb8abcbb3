use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};
use crate::locale::Vendor;

pub struct VendorCommand;

#[async_trait]
impl Command for VendorCommand {
    fn name(&self) -> &str {
        "/vendor"
    }

    fn usage(&self) -> &str {
        "<name>"
    }

    fn description(&self) -> &str {
        "show or switch the storage vendor"
    }

    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult {
        if args.is_empty() {
            for vendor in Vendor::ALL {
                let marker = if vendor == info.vendor { " ← current" } else { "" };
                println!("  {vendor}{marker}");
            }
            return CommandResult::Handled;
        }

        match args.parse::<Vendor>() {
            Ok(vendor) if vendor == info.vendor => {
                println!("  already using {vendor}");
                CommandResult::Handled
            }
            Ok(vendor) => {
                println!("  ✓ vendor set to {vendor}");
                CommandResult::StateChanged(StateChange::Vendor(vendor))
            }
            Err(e) => {
                eprintln!("  ✗ {e}");
                CommandResult::Handled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_info;

    #[tokio::test]
    async fn switches_by_alias() {
        assert_eq!(
            VendorCommand.execute("powermax", &test_info()).await,
            CommandResult::StateChanged(StateChange::Vendor(Vendor::DellEmcPowerMax))
        );
    }

    #[tokio::test]
    async fn same_or_unknown_vendor_is_handled() {
        let info = test_info();
        assert_eq!(VendorCommand.execute("netapp", &info).await, CommandResult::Handled);
        assert_eq!(VendorCommand.execute("hitachi", &info).await, CommandResult::Handled);
        assert_eq!(VendorCommand.execute("", &info).await, CommandResult::Handled);
    }
}
