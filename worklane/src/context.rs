//! WorklaneContext - I/O primitives for worklane storage
//!
//! The context provides access to storage and utilities. No business logic
//! methods, just data access primitives. Commands do all the work.

use crate::defaults;
use crate::error::{Result, WorklaneError};
use crate::events::EventBus;
use crate::types::{
    Board, Column, ColumnId, Member, MemberId, Notification, NotificationId, Task, TaskId,
    TimeEntry, TimeEntryId,
};
use fs2::FileExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use worklane_fields::{FieldDef, FieldKind, FieldsContext, MemberLookup, SelectOption};
use worklane_operations::LogEntry;

/// Context passed to every command - provides access, not logic
pub struct WorklaneContext {
    /// Path to the .worklane directory
    root: PathBuf,
    /// In-process push channel for realtime events
    events: EventBus,
}

impl WorklaneContext {
    /// Create a new context for the given .worklane directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            events: EventBus::new(),
        }
    }

    /// Create a context by finding the .worklane directory from a starting path
    pub fn find(start: impl AsRef<Path>) -> Result<Self> {
        let mut current = start.as_ref().to_path_buf();

        loop {
            let worklane_dir = current.join(".worklane");
            if worklane_dir.is_dir() {
                return Ok(Self::new(worklane_dir));
            }

            if !current.pop() {
                return Err(WorklaneError::NotInitialized {
                    path: start.as_ref().to_path_buf(),
                });
            }
        }
    }

    /// The in-process event bus for realtime push subscriptions
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // =========================================================================
    // Path helpers
    // =========================================================================

    /// Get the root .worklane directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to board.json
    pub fn board_path(&self) -> PathBuf {
        self.root.join("board.json")
    }

    /// Path to the tasks directory
    pub fn tasks_dir(&self) -> PathBuf {
        self.root.join("tasks")
    }

    /// Path to a task's JSON file
    pub fn task_path(&self, id: &TaskId) -> PathBuf {
        self.tasks_dir().join(format!("{}.json", id))
    }

    /// Path to a task's log file
    pub fn task_log_path(&self, id: &TaskId) -> PathBuf {
        self.tasks_dir().join(format!("{}.jsonl", id))
    }

    /// Path to the columns directory
    pub fn columns_dir(&self) -> PathBuf {
        self.root.join("columns")
    }

    /// Path to a column's JSON file
    pub fn column_path(&self, id: &ColumnId) -> PathBuf {
        self.columns_dir().join(format!("{}.json", id))
    }

    /// Path to the members directory
    pub fn members_dir(&self) -> PathBuf {
        self.root.join("members")
    }

    /// Path to a member's JSON file
    pub fn member_path(&self, id: &MemberId) -> PathBuf {
        self.members_dir().join(format!("{}.json", id))
    }

    /// Path to the time entries directory
    pub fn time_dir(&self) -> PathBuf {
        self.root.join("time")
    }

    /// Path to a time entry's JSON file
    pub fn time_entry_path(&self, id: &TimeEntryId) -> PathBuf {
        self.time_dir().join(format!("{}.json", id))
    }

    /// Path to the notifications directory
    pub fn notifications_dir(&self) -> PathBuf {
        self.root.join("notifications")
    }

    /// Path to a notification's JSON file
    pub fn notification_path(&self, id: &NotificationId) -> PathBuf {
        self.notifications_dir().join(format!("{}.json", id))
    }

    /// Path to the fields registry directory
    pub fn fields_dir(&self) -> PathBuf {
        self.root.join("fields")
    }

    /// Path to the settings file
    pub fn settings_path(&self) -> PathBuf {
        self.root.join("settings.yaml")
    }

    /// Path to the activity directory
    pub fn activity_dir(&self) -> PathBuf {
        self.root.join("activity")
    }

    /// Path to the current activity log
    pub fn activity_path(&self) -> PathBuf {
        self.activity_dir().join("current.jsonl")
    }

    /// Path to the lock file
    pub fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }

    // =========================================================================
    // Directory initialization
    // =========================================================================

    /// Check if the board is initialized
    pub fn is_initialized(&self) -> bool {
        self.board_path().exists()
    }

    /// Check if all required directories exist
    pub fn directories_exist(&self) -> bool {
        self.root.exists()
            && self.tasks_dir().exists()
            && self.columns_dir().exists()
            && self.members_dir().exists()
            && self.time_dir().exists()
            && self.notifications_dir().exists()
            && self.activity_dir().exists()
    }

    /// Create the directory structure for a new board
    ///
    /// This is idempotent - safe to call multiple times.
    pub async fn create_directories(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;

        fs::create_dir_all(self.tasks_dir()).await?;
        fs::create_dir_all(self.columns_dir()).await?;
        fs::create_dir_all(self.members_dir()).await?;
        fs::create_dir_all(self.time_dir()).await?;
        fs::create_dir_all(self.notifications_dir()).await?;
        fs::create_dir_all(self.activity_dir()).await?;
        Ok(())
    }

    /// Ensure directories exist, creating them if needed
    pub async fn ensure_directories(&self) -> Result<()> {
        if !self.directories_exist() {
            self.create_directories().await?;
        }
        Ok(())
    }

    // =========================================================================
    // Board I/O
    // =========================================================================

    /// Read the board file
    pub async fn read_board(&self) -> Result<Board> {
        let path = self.board_path();
        if !path.exists() {
            return Err(WorklaneError::NotInitialized {
                path: self.root.clone(),
            });
        }

        let content = fs::read_to_string(&path).await?;
        let board: Board = serde_json::from_str(&content)?;
        Ok(board)
    }

    /// Write the board file (atomic write via temp file)
    pub async fn write_board(&self, board: &Board) -> Result<()> {
        let content = serde_json::to_string_pretty(board)?;
        atomic_write(&self.board_path(), content.as_bytes()).await
    }

    // =========================================================================
    // Task I/O
    // =========================================================================

    /// Read a task file
    pub async fn read_task(&self, id: &TaskId) -> Result<Task> {
        let path = self.task_path(id);
        if !path.exists() {
            return Err(WorklaneError::TaskNotFound { id: id.to_string() });
        }

        let content = fs::read_to_string(&path).await?;
        let mut task: Task = serde_json::from_str(&content)?;
        task.id = id.clone();
        Ok(task)
    }

    /// Write a task file (atomic write via temp file)
    pub async fn write_task(&self, task: &Task) -> Result<()> {
        let content = serde_json::to_string_pretty(task)?;
        atomic_write(&self.task_path(&task.id), content.as_bytes()).await
    }

    /// Delete a task file and its log
    pub async fn delete_task_file(&self, id: &TaskId) -> Result<()> {
        remove_if_exists(&self.task_path(id)).await?;
        remove_if_exists(&self.task_log_path(id)).await?;
        Ok(())
    }

    /// List all task IDs by reading the tasks directory
    pub async fn list_task_ids(&self) -> Result<Vec<TaskId>> {
        Ok(list_json_stems(&self.tasks_dir())
            .await?
            .into_iter()
            .map(TaskId::from_string)
            .collect())
    }

    /// Read all tasks
    pub async fn read_all_tasks(&self) -> Result<Vec<Task>> {
        let ids = self.list_task_ids().await?;
        let mut tasks = Vec::with_capacity(ids.len());
        for id in ids {
            tasks.push(self.read_task(&id).await?);
        }
        Ok(tasks)
    }

    // =========================================================================
    // Column I/O
    // =========================================================================

    /// Read a column file
    pub async fn read_column(&self, id: &ColumnId) -> Result<Column> {
        let path = self.column_path(id);
        if !path.exists() {
            return Err(WorklaneError::ColumnNotFound { id: id.to_string() });
        }

        let content = fs::read_to_string(&path).await?;
        let mut column: Column = serde_json::from_str(&content)?;
        column.id = id.clone();
        Ok(column)
    }

    /// Write a column file (atomic write via temp file)
    pub async fn write_column(&self, column: &Column) -> Result<()> {
        let content = serde_json::to_string_pretty(column)?;
        atomic_write(&self.column_path(&column.id), content.as_bytes()).await
    }

    /// Delete a column file
    pub async fn delete_column_file(&self, id: &ColumnId) -> Result<()> {
        remove_if_exists(&self.column_path(id)).await
    }

    /// Check if a column exists
    pub fn column_exists(&self, id: &ColumnId) -> bool {
        self.column_path(id).exists()
    }

    /// Read all columns, sorted by display order
    pub async fn read_all_columns(&self) -> Result<Vec<Column>> {
        let ids: Vec<ColumnId> = list_json_stems(&self.columns_dir())
            .await?
            .into_iter()
            .map(ColumnId::from_string)
            .collect();

        let mut columns = Vec::with_capacity(ids.len());
        for id in ids {
            columns.push(self.read_column(&id).await?);
        }
        columns.sort_by_key(|c| c.order);
        Ok(columns)
    }

    // =========================================================================
    // Member I/O
    // =========================================================================

    /// Read a member file
    pub async fn read_member(&self, id: &MemberId) -> Result<Member> {
        let path = self.member_path(id);
        if !path.exists() {
            return Err(WorklaneError::MemberNotFound { id: id.to_string() });
        }

        let content = fs::read_to_string(&path).await?;
        let mut member: Member = serde_json::from_str(&content)?;
        member.id = id.clone();
        Ok(member)
    }

    /// Write a member file (atomic write via temp file)
    pub async fn write_member(&self, member: &Member) -> Result<()> {
        let content = serde_json::to_string_pretty(member)?;
        atomic_write(&self.member_path(&member.id), content.as_bytes()).await
    }

    /// Delete a member file
    pub async fn delete_member_file(&self, id: &MemberId) -> Result<()> {
        remove_if_exists(&self.member_path(id)).await
    }

    /// Check if a member exists
    pub fn member_exists(&self, id: &MemberId) -> bool {
        self.member_path(id).exists()
    }

    /// Read all members
    pub async fn read_all_members(&self) -> Result<Vec<Member>> {
        let ids: Vec<MemberId> = list_json_stems(&self.members_dir())
            .await?
            .into_iter()
            .map(MemberId::from_string)
            .collect();

        let mut members = Vec::with_capacity(ids.len());
        for id in ids {
            members.push(self.read_member(&id).await?);
        }
        Ok(members)
    }

    /// A synchronous member-existence lookup for field validation
    pub fn member_lookup(&self) -> Arc<dyn MemberLookup> {
        Arc::new(MemberDirLookup {
            members_dir: self.members_dir(),
        })
    }

    // =========================================================================
    // Time entry I/O
    // =========================================================================

    /// Read a time entry file
    pub async fn read_time_entry(&self, id: &TimeEntryId) -> Result<TimeEntry> {
        let path = self.time_entry_path(id);
        if !path.exists() {
            return Err(WorklaneError::TimeEntryNotFound { id: id.to_string() });
        }

        let content = fs::read_to_string(&path).await?;
        let mut entry: TimeEntry = serde_json::from_str(&content)?;
        entry.id = id.clone();
        Ok(entry)
    }

    /// Write a time entry file (atomic write via temp file)
    pub async fn write_time_entry(&self, entry: &TimeEntry) -> Result<()> {
        let content = serde_json::to_string_pretty(entry)?;
        atomic_write(&self.time_entry_path(&entry.id), content.as_bytes()).await
    }

    /// Read all time entries
    pub async fn read_all_time_entries(&self) -> Result<Vec<TimeEntry>> {
        let ids: Vec<TimeEntryId> = list_json_stems(&self.time_dir())
            .await?
            .into_iter()
            .map(TimeEntryId::from_string)
            .collect();

        let mut entries = Vec::with_capacity(ids.len());
        for id in ids {
            entries.push(self.read_time_entry(&id).await?);
        }
        Ok(entries)
    }

    /// Find the running time entry for a member, if any
    pub async fn find_running_entry(&self, member: &MemberId) -> Result<Option<TimeEntry>> {
        Ok(self
            .read_all_time_entries()
            .await?
            .into_iter()
            .find(|e| &e.member == member && e.is_running()))
    }

    // =========================================================================
    // Notification I/O
    // =========================================================================

    /// Read a notification file
    pub async fn read_notification(&self, id: &NotificationId) -> Result<Notification> {
        let path = self.notification_path(id);
        if !path.exists() {
            return Err(WorklaneError::NotificationNotFound { id: id.to_string() });
        }

        let content = fs::read_to_string(&path).await?;
        let mut notification: Notification = serde_json::from_str(&content)?;
        notification.id = id.clone();
        Ok(notification)
    }

    /// Write a notification file (atomic write via temp file)
    pub async fn write_notification(&self, notification: &Notification) -> Result<()> {
        let content = serde_json::to_string_pretty(notification)?;
        atomic_write(
            &self.notification_path(&notification.id),
            content.as_bytes(),
        )
        .await
    }

    /// Read all notifications
    pub async fn read_all_notifications(&self) -> Result<Vec<Notification>> {
        let ids: Vec<NotificationId> = list_json_stems(&self.notifications_dir())
            .await?
            .into_iter()
            .map(NotificationId::from_string)
            .collect();

        let mut notifications = Vec::with_capacity(ids.len());
        for id in ids {
            notifications.push(self.read_notification(&id).await?);
        }
        Ok(notifications)
    }

    // =========================================================================
    // Field registry
    // =========================================================================

    /// Open the fields registry, seeding built-in definitions on first use
    pub async fn fields(&self) -> Result<FieldsContext> {
        let ctx = FieldsContext::open(self.fields_dir())
            .with_defaults(defaults::builtin_fields())
            .build()
            .await?;
        Ok(ctx)
    }

    /// Resolve the definition of an editable task field by name.
    ///
    /// The `status` field is derived from the live column set rather than a
    /// stored definition, so its options never go stale as columns change.
    pub async fn field_def(&self, name: &str) -> Result<FieldDef> {
        if name == "status" {
            let columns = self.read_all_columns().await?;
            let options = columns
                .iter()
                .enumerate()
                .map(|(i, c)| SelectOption::new(c.id.as_str(), i as i32))
                .collect();
            let mut def = FieldDef::new("status", FieldKind::SingleSelect { options }).required();
            if let Some(first) = columns.first() {
                def = def.with_default(first.id.as_str());
            }
            return Ok(def);
        }

        let fields = self.fields().await?;
        Ok(fields.require_field(name)?.clone())
    }

    // =========================================================================
    // Activity logging
    // =========================================================================

    /// Append a log entry to the global activity log
    pub async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        self.append_log(&self.activity_path(), entry).await
    }

    /// Append a log entry to a task's log
    pub async fn append_task_log(&self, task_id: &TaskId, entry: &LogEntry) -> Result<()> {
        self.append_log(&self.task_log_path(task_id), entry).await
    }

    /// Append a log entry to a JSONL file
    async fn append_log(&self, path: &Path, entry: &LogEntry) -> Result<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    /// Read activity log entries, newest first
    pub async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        self.read_log(&self.activity_path(), limit).await
    }

    /// Read a task's log entries, newest first
    pub async fn read_task_log(
        &self,
        task_id: &TaskId,
        limit: Option<usize>,
    ) -> Result<Vec<LogEntry>> {
        self.read_log(&self.task_log_path(task_id), limit).await
    }

    async fn read_log(&self, path: &Path, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path).await?;
        let mut entries: Vec<LogEntry> = content
            .lines()
            .filter(|line| !line.is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();

        // Reverse to get newest first
        entries.reverse();

        if let Some(limit) = limit {
            entries.truncate(limit);
        }

        Ok(entries)
    }

    // =========================================================================
    // Locking
    // =========================================================================

    /// Try to acquire an exclusive lock (non-blocking)
    pub async fn lock(&self) -> Result<WorklaneLock> {
        let lock_path = self.lock_path();

        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(WorklaneLock {
                file,
                path: lock_path,
            }),
            Err(_) => Err(WorklaneError::LockBusy),
        }
    }
}

/// RAII lock guard - releases on drop
pub struct WorklaneLock {
    file: std::fs::File,
    #[allow(dead_code)]
    path: PathBuf,
}

impl Drop for WorklaneLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Sync member-existence check against the members directory
struct MemberDirLookup {
    members_dir: PathBuf,
}

impl MemberLookup for MemberDirLookup {
    fn member_exists(&self, id: &str) -> bool {
        self.members_dir.join(format!("{}.json", id)).exists()
    }
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    // Write to temp file in same directory, rename is atomic on one filesystem
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;
    fs::rename(&temp_path, path).await?;

    Ok(())
}

async fn remove_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).await?;
    }
    Ok(())
}

/// File stems of every `.json` file in a directory (missing dir = empty)
async fn list_json_stems(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut stems = Vec::new();
    let mut entries = fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                stems.push(stem.to_string());
            }
        }
    }

    Ok(stems)
}
