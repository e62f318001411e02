use std::fmt;

use smart_wallet_utils::balance::BalanceEntry;

/// smart account together with the balances last fetched for it.
#[derive(Debug)]
pub struct ReadySession<P, A> {
    pub provider: P,
    pub account: A,
    pub balances: Vec<BalanceEntry>,
    pub usd_balance: Option<f64>,
}

impl<P, A> ReadySession<P, A> {
    pub fn new(provider: P, account: A) -> Self {
        Self {
            provider,
            account,
            balances: vec![],
            usd_balance: None,
        }
    }
}

/// lifecycle of a wallet session.
///
/// `LoggedOut -> Connecting -> Connected -> Bootstrapping -> Ready <-> TransferPending`.
/// a failed bootstrap falls back to `Connected` so it can be retried.
#[derive(Debug)]
pub enum SessionState<P, A> {
    LoggedOut,
    Connecting,
    Connected {
        provider: P,
    },
    Bootstrapping {
        provider: P,
    },
    Ready(ReadySession<P, A>),
    TransferPending(ReadySession<P, A>),
}

impl<P, A> Default for SessionState<P, A> {
    fn default() -> Self {
        SessionState::LoggedOut
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    LoggedOut,
    Connecting,
    Connected,
    Bootstrapping,
    Ready,
    TransferPending,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::LoggedOut => "logged-out",
            SessionPhase::Connecting => "connecting",
            SessionPhase::Connected => "connected",
            SessionPhase::Bootstrapping => "bootstrapping",
            SessionPhase::Ready => "ready",
            SessionPhase::TransferPending => "transfer-pending",
        };
        write!(f, "{name}")
    }
}

impl<P, A> SessionState<P, A> {
    pub fn phase(&self) -> SessionPhase {
        match self {
            SessionState::LoggedOut => SessionPhase::LoggedOut,
            SessionState::Connecting => SessionPhase::Connecting,
            SessionState::Connected { .. } => SessionPhase::Connected,
            SessionState::Bootstrapping { .. } => SessionPhase::Bootstrapping,
            SessionState::Ready(_) => SessionPhase::Ready,
            SessionState::TransferPending(_) => SessionPhase::TransferPending,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Bootstrapping { .. })
    }

    /// true once a smart account exists for this session
    pub fn has_account(&self) -> bool {
        self.ready().is_some()
    }

    pub fn ready(&self) -> Option<&ReadySession<P, A>> {
        match self {
            SessionState::Ready(ready) | SessionState::TransferPending(ready) => Some(ready),
            _ => None,
        }
    }

    pub fn account(&self) -> Option<&A> {
        self.ready().map(|ready| &ready.account)
    }

    pub fn balances(&self) -> &[BalanceEntry] {
        self.ready()
            .map(|ready| ready.balances.as_slice())
            .unwrap_or_default()
    }
}
