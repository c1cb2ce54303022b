//! Concrete adapter sets the HTTP surface can run on.

use crate::board::{
    adapters::{memory::InMemoryBoardRepository, postgres::PostgresBoardRepository},
    ports::BoardRepository,
};
use crate::notification::{
    adapters::{
        graph::GraphCalendarProvider,
        memory::{RecordingCalendar, RecordingMailer},
        smtp::SmtpMailer,
    },
    ports::{CalendarProvider, Mailer},
};
use crate::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    ports::TaskRepository,
};
use mockable::{Clock, DefaultClock};

/// Bundle of the adapter types an [`AppState`](super::AppState) is built
/// from.
pub trait Backend: Send + Sync + 'static {
    /// Task store.
    type Tasks: TaskRepository + 'static;
    /// Board and column store.
    type Boards: BoardRepository + 'static;
    /// Outbound mail transport.
    type Mailer: Mailer + 'static;
    /// Calendar provider.
    type Calendar: CalendarProvider + 'static;
    /// Time source.
    type Clock: Clock + Send + Sync + 'static;
}

/// Production adapters: `PostgreSQL`, SMTP and Microsoft Graph.
#[derive(Debug, Clone, Copy)]
pub struct PostgresBackend;

impl Backend for PostgresBackend {
    type Tasks = PostgresTaskRepository;
    type Boards = PostgresBoardRepository;
    type Mailer = SmtpMailer;
    type Calendar = GraphCalendarProvider;
    type Clock = DefaultClock;
}

/// In-process adapters for local runs and HTTP tests.
#[derive(Debug, Clone, Copy)]
pub struct InMemoryBackend;

impl Backend for InMemoryBackend {
    type Tasks = InMemoryTaskRepository;
    type Boards = InMemoryBoardRepository;
    type Mailer = RecordingMailer;
    type Calendar = RecordingCalendar;
    type Clock = DefaultClock;
}
