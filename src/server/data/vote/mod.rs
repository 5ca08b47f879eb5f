pub mod concluded;
pub mod ongoing;

pub use concluded::ConcludedVoteRepository;
pub use ongoing::OngoingVoteRepository;

#[cfg(test)]
mod test;
