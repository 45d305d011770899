//! Lua scripts for the redis lock backend

// Lua script to delete a lock only if it is still held by the caller's token
//
// KEYS[1]: lock key
// ARGV[1]: token written on acquire
//
// Returns:
//   1 if the lock was deleted
//   0 if the key is absent or held under another token
pub static RELEASE_LOCK_SCRIPT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1])
end
return 0
"#;
