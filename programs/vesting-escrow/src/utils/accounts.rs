use anchor_lang::prelude::*;

/// Associated token account of `owner` for `mint` under `token_program`.
///
/// ATA derivation: PDA(owner, token_program_id, mint) under the associated token program.
pub fn holding_account(owner: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
    let seeds: &[&[u8]] = &[owner.as_ref(), token_program.as_ref(), mint.as_ref()];
    let (ata, _) = Pubkey::find_program_address(seeds, &anchor_spl::associated_token::ID);
    ata
}
