use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

const NO_COMMIT_WITH_MESSAGE: &str = "Found no commit with that message.";

impl Repository {
    /// Show HEAD's first-parent history, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        let mut curr_commit_oid = Some(self.refs().head_oid().clone());

        while let Some(commit_oid) = curr_commit_oid {
            let commit = self.database().load_commit(&commit_oid)?;
            self.display_commit(&commit_oid, &commit)?;

            curr_commit_oid = commit.parent().cloned();
        }

        Ok(())
    }

    /// Show every stored commit, reachable or not, ordered by ID
    pub fn global_log(&self) -> anyhow::Result<()> {
        let mut commit_oids = self.database().commit_ids()?;
        commit_oids.sort();

        for commit_oid in commit_oids {
            let commit = self.database().load_commit(&commit_oid)?;
            self.display_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    /// Print the IDs of all commits whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let mut commit_oids = self.database().commit_ids()?;
        commit_oids.sort();

        let mut found = false;
        for commit_oid in commit_oids {
            if self.database().load_commit(&commit_oid)?.message() == message {
                writeln!(self.writer(), "{commit_oid}")?;
                found = true;
            }
        }

        if !found {
            writeln!(self.writer(), "{NO_COMMIT_WITH_MESSAGE}")?;
        }

        Ok(())
    }

    fn display_commit(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {commit_oid}")?;
        if let (Some(first), Some(second)) = (commit.parents().first(), commit.parents().second()) {
            writeln!(
                writer,
                "Merge: {} {}",
                first.to_short_oid(),
                second.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
