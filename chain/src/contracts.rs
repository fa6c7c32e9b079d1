//! ABI bindings for the contracts the client consumes.
//!
//! Only the interface is described here; the contracts themselves are
//! deployed and treated as fixed.

use alloy_sol_types::sol;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface ISplitterFactory {
        event SplitterCreated(
            address indexed splitter,
            address indexed creator,
            address[] recipients,
            uint256[] shares
        );

        error FailedDeployment();
        error InsufficientBalance(uint256 balance, uint256 needed);

        function createSplitter(address[] calldata recipients, uint256[] calldata shares)
            external
            returns (address splitter);

        function implementation() external view returns (address);
    }
}

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface ISimpleSplitter {
        function recipientCount() external view returns (uint256);
        function totalShares() external view returns (uint256);
        function recipients(uint256 index) external view returns (address);
        function shares(uint256 index) external view returns (uint256);
        function distribute() external;
    }
}

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
    }
}
