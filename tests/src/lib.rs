#[cfg(test)]
mod wait;
