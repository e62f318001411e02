use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IERC20 {
        function name() external view returns (string);
        function balanceOf(address account) external view returns (uint256);
    }
}

sol! {
    #[sol(rpc)]
    interface ISmartAccountFactory {
        function getAddressForCounterFactualAccount(address owner, uint256 index) external view returns (address);
    }
}

sol! {
    interface ISmartAccount {
        function executeBatch(address[] calldata dest, uint256[] calldata value, bytes[] calldata func) external;
    }
}
